// ABOUTME: System-wide constants and configuration defaults for the nutrition facts server
// ABOUTME: Service names, upstream endpoints, nutrient filters, route paths and user messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults. Anything operators may change is read by
//! [`crate::config::environment`] and only falls back to the values here.

/// Service names
pub mod service_names {
    /// Nutrition facts server service name
    pub const NUTRITION_FACTS_SERVER: &str = "nutrition_facts_server";
    /// Upstream food database, as used in logs and error messages
    pub const USDA_API: &str = "USDA API";
}

/// Default listening address
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default bind host
    pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
}

/// USDA `FoodData` Central defaults
pub mod usda {
    /// Public API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Shared demonstration key, heavily rate limited upstream
    pub const DEMO_API_KEY: &str = "DEMO_KEY";
    /// Response cache lifetime (24 hours)
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;
    /// Entries each response cache holds before evicting
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1000;
    /// Client-side request budget per minute
    pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 30;
    /// Default number of search results
    pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 25;
    /// Smallest page size the search endpoint accepts
    pub const MIN_SEARCH_PAGE_SIZE: u32 = 1;
    /// Largest page size the search endpoint accepts
    pub const MAX_SEARCH_PAGE_SIZE: u32 = 200;
    /// Upstream request timeout
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Detail requests ask for the full record format
    pub const DETAIL_FORMAT: &str = "full";

    /// Nutrient numbers requested with every detail lookup.
    ///
    /// Energy, macronutrients, minerals, vitamins A/C/E, cholesterol and fatty acids.
    pub const DETAIL_NUTRIENT_NUMBERS: [u16; 26] = [
        203, 204, 205, 206, 208, 211, 301, 302, 303, 304, 305, 306, 307, 308, 309, 310, 312, 313,
        320, 323, 328, 401, 601, 606, 645, 646,
    ];
}

/// Route paths
pub mod routes {
    /// Liveness probe
    pub const HEALTH: &str = "/health";
    /// Readiness probe
    pub const READY: &str = "/ready";
    /// Food search
    pub const FOOD_SEARCH: &str = "/api/foods/search";
    /// Food detail panel
    pub const FOOD_DETAIL: &str = "/api/foods/:fdc_id";
}

/// Messages shown to end users
pub mod messages {
    /// Search returned nothing for a non-blank query
    pub const NO_MATCHING_FOODS: &str = "No matching food items.";
    /// Detail lookup for an id the upstream does not know
    pub const FOOD_NOT_FOUND: &str = "We could not find your food item.";
}

/// Request correlation
pub mod headers {
    /// Header carrying the request id
    pub const REQUEST_ID: &str = "x-request-id";
}
