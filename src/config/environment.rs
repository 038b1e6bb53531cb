// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses listening address, USDA client settings and CORS origins from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{ports, usda};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Environment type for logging and operational defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// HTTP bind address
    pub http_host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Log level directive
    pub log_level: String,
    /// Upstream food database settings
    pub usda: UsdaApiConfig,
    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,
}

/// USDA `FoodData` Central settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdaApiConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Response cache lifetime in seconds
    pub cache_ttl_secs: u64,
    /// Entries per response cache
    pub cache_max_entries: usize,
    /// Client-side request budget per minute
    pub rate_limit_per_minute: u32,
    /// Default number of search results
    pub search_page_size: u32,
    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,
}

impl UsdaApiConfig {
    /// Upstream request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether the shared demonstration key is in use
    #[must_use]
    pub fn uses_demo_key(&self) -> bool {
        self.api_key == usda::DEMO_API_KEY
    }
}

impl Default for UsdaApiConfig {
    fn default() -> Self {
        Self {
            api_key: usda::DEMO_API_KEY.to_owned(),
            base_url: usda::DEFAULT_BASE_URL.to_owned(),
            cache_ttl_secs: usda::DEFAULT_CACHE_TTL_SECS,
            cache_max_entries: usda::DEFAULT_CACHE_MAX_ENTRIES,
            rate_limit_per_minute: usda::DEFAULT_RATE_LIMIT_PER_MINUTE,
            search_page_size: usda::DEFAULT_SEARCH_PAGE_SIZE,
            request_timeout_secs: usda::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or is out of range
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let usda = load_usda_config()?;
        if usda.uses_demo_key() {
            warn!("USDA_API_KEY not set, using the rate-limited {} key", usda::DEMO_API_KEY);
        }

        Ok(Self {
            http_port: parse_env("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            http_host: env_var_or("HTTP_HOST", ports::DEFAULT_HTTP_HOST),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            log_level: env_var_or("RUST_LOG", "info"),
            usda,
            cors_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
        })
    }

    /// Bind address in `host:port` form
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutrition Facts Server Configuration:\n\
             - Bind Address: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - USDA Base URL: {}\n\
             - USDA API Key: {}\n\
             - USDA Cache TTL: {}s\n\
             - USDA Cache Size: {} entries\n\
             - USDA Rate Limit: {}/min\n\
             - Search Page Size: {}\n\
             - CORS Origins: {}",
            self.bind_address(),
            self.environment,
            self.log_level,
            self.usda.base_url,
            if self.usda.uses_demo_key() {
                "Demo"
            } else {
                "Configured"
            },
            self.usda.cache_ttl_secs,
            self.usda.cache_max_entries,
            self.usda.rate_limit_per_minute,
            self.usda.search_page_size,
            self.cors_origins.join(", "),
        )
    }
}

fn load_usda_config() -> Result<UsdaApiConfig> {
    let search_page_size = parse_env("USDA_SEARCH_PAGE_SIZE", usda::DEFAULT_SEARCH_PAGE_SIZE)?;
    if !(usda::MIN_SEARCH_PAGE_SIZE..=usda::MAX_SEARCH_PAGE_SIZE).contains(&search_page_size) {
        bail!(
            "USDA_SEARCH_PAGE_SIZE must be between {} and {}, got {search_page_size}",
            usda::MIN_SEARCH_PAGE_SIZE,
            usda::MAX_SEARCH_PAGE_SIZE
        );
    }

    let cache_max_entries = parse_env("USDA_CACHE_MAX_ENTRIES", usda::DEFAULT_CACHE_MAX_ENTRIES)?;
    if cache_max_entries == 0 {
        bail!("USDA_CACHE_MAX_ENTRIES must be at least 1");
    }

    Ok(UsdaApiConfig {
        api_key: env::var("USDA_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| usda::DEMO_API_KEY.to_owned()),
        base_url: env_var_or("USDA_API_BASE_URL", usda::DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_owned(),
        cache_ttl_secs: parse_env("USDA_CACHE_TTL_SECS", usda::DEFAULT_CACHE_TTL_SECS)?,
        cache_max_entries,
        rate_limit_per_minute: parse_env(
            "USDA_RATE_LIMIT_PER_MINUTE",
            usda::DEFAULT_RATE_LIMIT_PER_MINUTE,
        )?,
        search_page_size,
        request_timeout_secs: parse_env(
            "USDA_REQUEST_TIMEOUT_SECS",
            usda::DEFAULT_REQUEST_TIMEOUT_SECS,
        )?,
    })
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
