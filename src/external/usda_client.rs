// ABOUTME: USDA FoodData Central API client for nutritional data retrieval
// ABOUTME: Fetches raw food records and search results with TTL caching and client-side rate limiting

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! USDA `FoodData` Central client
//!
//! - `GET {base}/food/{fdcId}?format=full&nutrients=...` for detail records,
//!   restricted to the nutrients the panel can display
//! - `GET {base}/foods/search?query=...&pageSize=...` for the search box
//!
//! Both responses are cached for `cache_ttl_secs` (24 hours by default) in LRU
//! caches holding at most `cache_max_entries` each, and every upstream call
//! waits for a slot in a per-minute request window. Detail records
//! come back untouched as [`RawFoodRecord`]; interpreting them is the job of
//! [`nutrition_core::normalize`].
//!
//! API guide: <https://fdc.nal.usda.gov/api-guide.html>

use super::FoodDataSource;
use crate::config::UsdaApiConfig;
use crate::constants::{messages, service_names, usda};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use async_trait::async_trait;
use nutrition_core::RawFoodRecord;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use lru::LruCache;
use std::collections::VecDeque;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

const RATE_WINDOW: Duration = Duration::from_secs(60);

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(usda::DEFAULT_CACHE_MAX_ENTRIES) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Settings for [`UsdaClient`]
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// API key, free from <https://fdc.nal.usda.gov/api-key-signup.html>
    pub api_key: String,
    /// API root without a trailing slash
    pub base_url: String,
    /// Lifetime of cached responses in seconds
    pub cache_ttl_secs: u64,
    /// Entries kept per cache before the least recently used is evicted
    pub cache_max_entries: usize,
    /// Upstream calls allowed per minute
    pub rate_limit_per_minute: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self::from(&UsdaApiConfig::default())
    }
}

impl From<&UsdaApiConfig> for UsdaClientConfig {
    fn from(config: &UsdaApiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            cache_ttl_secs: config.cache_ttl_secs,
            cache_max_entries: config.cache_max_entries,
            rate_limit_per_minute: config.rate_limit_per_minute,
            request_timeout: config.request_timeout(),
        }
    }
}

/// One hit of the upstream food search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// `FoodData` Central id
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Category label as sent upstream, e.g. "SR Legacy"
    pub data_type: String,
    /// Publication date as sent upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    /// Brand owner, branded foods only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_owner: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    foods: Vec<FoodSearchResult>,
}

/// Bounded LRU map whose values expire a fixed time after insertion
#[derive(Debug)]
struct TtlCache<K: Hash + Eq, V> {
    name: &'static str,
    ttl: Duration,
    entries: Mutex<LruCache<K, (V, Instant)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + ToString,
    V: Clone,
{
    fn new(name: &'static str, ttl: Duration, capacity: NonZeroUsize) -> Self {
        Self {
            name,
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Fresh value for `key`; an expired entry is dropped on the way out
    async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        if Instant::now() >= entries.peek(key)?.1 {
            entries.pop(key);
            return None;
        }
        let value = entries.get(key).map(|(value, _)| value.clone())?;
        drop(entries);
        AppLogger::log_cache_hit(self.name, &key.to_string());
        Some(value)
    }

    async fn insert(&self, key: K, value: V) {
        let expires_at = Instant::now() + self.ttl;
        self.entries.lock().await.put(key, (value, expires_at));
    }

    async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// Sliding-window request budget
#[derive(Debug)]
struct RequestWindow {
    sent: VecDeque<Instant>,
    limit: usize,
    window: Duration,
}

impl RequestWindow {
    fn new(limit: u32, window: Duration) -> Self {
        Self {
            sent: VecDeque::new(),
            limit: limit.max(1) as usize,
            window,
        }
    }

    /// Drop requests that left the window; `Some(wait)` if the budget is spent
    fn wait_needed(&mut self, now: Instant) -> Option<Duration> {
        while self
            .sent
            .front()
            .is_some_and(|sent| now.duration_since(*sent) >= self.window)
        {
            self.sent.pop_front();
        }
        if self.sent.len() < self.limit {
            return None;
        }
        self.sent
            .front()
            .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
    }

    /// Block until a slot is free, then claim it
    async fn acquire(&mut self) {
        while let Some(wait) = self.wait_needed(Instant::now()) {
            let wait = wait.max(Duration::from_millis(50));
            debug!(wait_ms = wait.as_millis(), "USDA request budget spent, waiting");
            sleep(wait).await;
        }
        self.sent.push_back(Instant::now());
    }
}

/// USDA `FoodData` Central API client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http: Client,
    searches: TtlCache<String, Vec<FoodSearchResult>>,
    details: TtlCache<u64, RawFoodRecord>,
    window: Mutex<RequestWindow>,
}

impl UsdaClient {
    /// Build a client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: UsdaClientConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let capacity = NonZeroUsize::new(config.cache_max_entries).unwrap_or(DEFAULT_CACHE_CAPACITY);

        Ok(Self {
            window: Mutex::new(RequestWindow::new(config.rate_limit_per_minute, RATE_WINDOW)),
            searches: TtlCache::new("usda_search", ttl, capacity),
            details: TtlCache::new("usda_details", ttl, capacity),
            http,
            config,
        })
    }

    /// Query parameters for a detail lookup: full format plus the displayed nutrients
    fn detail_query(&self) -> Vec<(&'static str, String)> {
        [
            ("format", usda::DETAIL_FORMAT.to_owned()),
            ("api_key", self.config.api_key.clone()),
        ]
        .into_iter()
        .chain(
            usda::DETAIL_NUTRIENT_NUMBERS
                .iter()
                .map(|number| ("nutrients", number.to_string())),
        )
        .collect()
    }

    /// Send one rate-limited request and decode a successful JSON body.
    ///
    /// `not_found` is returned as-is when the upstream answers 404.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
        request: RequestBuilder,
        not_found: AppError,
    ) -> AppResult<T> {
        self.window.lock().await.acquire().await;

        let started = Instant::now();
        let outcome = match request.send().await {
            Ok(response) if response.status().is_success() => response
                .json::<T>()
                .await
                .map_err(|e| AppError::external_service(service_names::USDA_API, format!("JSON parse error: {e}"))),
            Ok(response) => Err(self.status_error(response, not_found).await),
            Err(e) => Err(AppError::external_service(service_names::USDA_API, e)),
        };
        AppLogger::log_upstream_call(operation, url, outcome.is_ok(), started.elapsed());
        outcome
    }

    /// Map a non-success upstream status to an application error
    async fn status_error(&self, response: Response, not_found: AppError) -> AppError {
        match response.status() {
            StatusCode::NOT_FOUND => not_found,
            StatusCode::TOO_MANY_REQUESTS => AppError::external_rate_limited(
                service_names::USDA_API,
                self.config.rate_limit_per_minute,
            ),
            status => {
                let body = response.text().await.unwrap_or_default();
                AppError::external_service(service_names::USDA_API, format!("HTTP {status}: {body}"))
            }
        }
    }

    /// Forget every cached response
    pub async fn clear_caches(&self) {
        self.searches.clear().await;
        self.details.clear().await;
    }

    /// Number of cached (search, detail) entries, expired ones not yet read included
    pub async fn cache_stats(&self) -> (usize, usize) {
        (self.searches.len().await, self.details.len().await)
    }
}

/// Reject search requests the upstream cannot serve
pub(crate) fn validate_search_request(query: &str, page_size: u32) -> AppResult<()> {
    if query.trim().is_empty() {
        return Err(AppError::invalid_input("Search query cannot be empty"));
    }
    if !(usda::MIN_SEARCH_PAGE_SIZE..=usda::MAX_SEARCH_PAGE_SIZE).contains(&page_size) {
        return Err(AppError::invalid_input(format!(
            "Page size must be between {} and {}",
            usda::MIN_SEARCH_PAGE_SIZE,
            usda::MAX_SEARCH_PAGE_SIZE
        )));
    }
    Ok(())
}

/// Error returned for an id the upstream does not know
pub(crate) fn food_not_found(fdc_id: u64) -> AppError {
    AppError::new(ErrorCode::ResourceNotFound, messages::FOOD_NOT_FOUND)
        .with_resource_id(fdc_id.to_string())
}

#[async_trait]
impl FoodDataSource for UsdaClient {
    async fn fetch_food_record(&self, fdc_id: u64) -> AppResult<RawFoodRecord> {
        if let Some(record) = self.details.get(&fdc_id).await {
            return Ok(record);
        }

        let url = format!("{}/food/{fdc_id}", self.config.base_url);
        let request = self.http.get(&url).query(&self.detail_query());
        let record: RawFoodRecord = self
            .get_json("food_detail", &url, request, food_not_found(fdc_id))
            .await?;

        self.details.insert(fdc_id, record.clone()).await;
        Ok(record)
    }

    async fn search_foods(&self, query: &str, page_size: u32) -> AppResult<Vec<FoodSearchResult>> {
        validate_search_request(query, page_size)?;

        let cache_key = format!("{query}:{page_size}");
        if let Some(foods) = self.searches.get(&cache_key).await {
            return Ok(foods);
        }

        let url = format!("{}/foods/search", self.config.base_url);
        let page_size = page_size.to_string();
        let request = self.http.get(&url).query(&[
            ("query", query),
            ("pageSize", page_size.as_str()),
            ("api_key", self.config.api_key.as_str()),
        ]);
        let not_found = AppError::not_found(format!("Search endpoint {url}"));
        let page: SearchPage = self.get_json("food_search", &url, request, not_found).await?;

        self.searches.insert(cache_key, page.foods.clone()).await;
        Ok(page.foods)
    }

    fn name(&self) -> &'static str {
        "usda"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_window_budget() {
        let mut window = RequestWindow::new(2, RATE_WINDOW);
        let start = Instant::now();
        assert_eq!(window.wait_needed(start), None);
        window.sent.push_back(start);
        window.sent.push_back(start);

        let wait = window.wait_needed(start + Duration::from_secs(1)).unwrap();
        assert_eq!(wait, Duration::from_secs(59));
        assert_eq!(window.wait_needed(start + RATE_WINDOW), None);
        assert!(window.sent.is_empty());
    }

    #[tokio::test]
    async fn test_ttl_cache_expiry() {
        let fresh = TtlCache::new("test", Duration::from_secs(60), DEFAULT_CACHE_CAPACITY);
        fresh.insert(7_u64, "seven").await;
        assert_eq!(fresh.get(&7).await, Some("seven"));

        let expired = TtlCache::new("test", Duration::ZERO, DEFAULT_CACHE_CAPACITY);
        expired.insert(7_u64, "seven").await;
        assert_eq!(expired.len().await, 1);
        assert_eq!(expired.get(&7).await, None);
        assert_eq!(expired.len().await, 0);
    }

    #[tokio::test]
    async fn test_ttl_cache_evicts_least_recently_used() {
        let capacity = NonZeroUsize::new(2).unwrap();
        let cache = TtlCache::new("test", Duration::from_secs(60), capacity);
        cache.insert(1_u64, "one").await;
        cache.insert(2_u64, "two").await;
        cache.insert(3_u64, "three").await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.get(&2).await, Some("two"));
        assert_eq!(cache.get(&3).await, Some("three"));
    }

    #[tokio::test]
    async fn test_ttl_cache_stays_bounded_under_churn() {
        let capacity = NonZeroUsize::new(100).unwrap();
        let cache = TtlCache::new("test", Duration::ZERO, capacity);
        for key in 0..10_000_u64 {
            cache.insert(key, key).await;
        }
        assert_eq!(cache.len().await, 100);
    }

    #[test]
    fn test_zero_capacity_falls_back_to_default() {
        let client = UsdaClient::new(UsdaClientConfig {
            cache_max_entries: 0,
            ..UsdaClientConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.details.entries.try_lock().unwrap().cap(),
            DEFAULT_CACHE_CAPACITY
        );
    }

    #[test]
    fn test_detail_query_requests_displayed_nutrients() {
        let client = UsdaClient::new(UsdaClientConfig::default()).unwrap();
        let query = client.detail_query();
        assert!(query.contains(&("format", "full".to_owned())));
        let nutrients = query.iter().filter(|(key, _)| *key == "nutrients").count();
        assert_eq!(nutrients, usda::DETAIL_NUTRIENT_NUMBERS.len());
        assert!(query.contains(&("nutrients", "646".to_owned())));
    }

    #[test]
    fn test_validate_search_request() {
        assert!(validate_search_request("apple", 25).is_ok());
        assert!(validate_search_request("  ", 25).is_err());
        assert!(validate_search_request("apple", 0).is_err());
        assert!(validate_search_request("apple", 201).is_err());
    }

    #[test]
    fn test_search_result_deserializes_upstream_fields() {
        let result: FoodSearchResult = serde_json::from_value(serde_json::json!({
            "fdcId": 171_688,
            "description": "Apples, raw, with skin",
            "dataType": "SR Legacy",
            "publicationDate": "4/1/2019",
            "score": 512.3
        }))
        .unwrap();
        assert_eq!(result.fdc_id, 171_688);
        assert_eq!(result.brand_owner, None);
    }
}
