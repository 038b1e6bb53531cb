// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Defines the food data source seam implemented by the live client and the mock
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External API Clients
//!
//! The server never talks to the upstream API directly; handlers hold an
//! `Arc<dyn FoodDataSource>` so tests can swap in [`MockUsdaClient`].

/// In-memory fixtures for tests
pub mod mock_usda;
/// Live USDA `FoodData` Central client
pub mod usda_client;

pub use mock_usda::MockUsdaClient;
pub use usda_client::{FoodSearchResult, UsdaClient, UsdaClientConfig};

use crate::errors::AppResult;
use async_trait::async_trait;
use nutrition_core::RawFoodRecord;

/// Source of raw food records and search results
#[async_trait]
pub trait FoodDataSource: Send + Sync {
    /// Fetch the full record for one food
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the id is unknown upstream, or an
    /// external-service error when the request fails
    async fn fetch_food_record(&self, fdc_id: u64) -> AppResult<RawFoodRecord>;

    /// Search foods by free text, returning at most `page_size` results in upstream order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty query or out-of-range page size, or an
    /// external-service error when the request fails
    async fn search_foods(&self, query: &str, page_size: u32) -> AppResult<Vec<FoodSearchResult>>;

    /// Short name used in logs and readiness output
    fn name(&self) -> &'static str;
}
