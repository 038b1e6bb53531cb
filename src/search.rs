// ABOUTME: Search-box query handling for food lookup by free text
// ABOUTME: Rejects queries that break the upstream search and maps results to select options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::external::{FoodDataSource, FoodSearchResult};
use serde::Serialize;
use tracing::debug;

/// Single characters the upstream search endpoint fails on
const REJECTED_QUERIES: [&str; 4] = ["/", "\\", "[", "]"];

/// A validated search-box query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Nothing but whitespace; no search is performed
    Blank,
    /// Text to send upstream, trimmed
    Text(String),
}

impl SearchQuery {
    /// Validate raw search-box input
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the query is exactly one of `/`, `\`, `[` or `]`
    pub fn parse(raw: &str) -> AppResult<Self> {
        if REJECTED_QUERIES.contains(&raw) {
            return Err(AppError::invalid_input(format!(
                "Search query {raw:?} is not supported"
            )));
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(Self::Blank)
        } else {
            Ok(Self::Text(trimmed.to_owned()))
        }
    }
}

/// One entry of the search drop-down
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOption {
    /// Food description
    pub label: String,
    /// `FoodData` Central id to open
    pub value: u64,
}

impl From<FoodSearchResult> for SearchOption {
    fn from(result: FoodSearchResult) -> Self {
        Self {
            label: result.description,
            value: result.fdc_id,
        }
    }
}

/// Search response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Query as received
    pub query: String,
    /// Options in upstream order
    pub options: Vec<SearchOption>,
    /// Shown when a non-blank query matched nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl SearchOutcome {
    fn blank(query: &str) -> Self {
        Self {
            query: query.to_owned(),
            options: Vec::new(),
            message: None,
        }
    }

    fn from_results(query: &str, results: Vec<FoodSearchResult>) -> Self {
        let options: Vec<SearchOption> = results.into_iter().map(SearchOption::from).collect();
        let message = options.is_empty().then_some(messages::NO_MATCHING_FOODS);
        Self {
            query: query.to_owned(),
            options,
            message,
        }
    }
}

/// Run a search-box query against a food data source
///
/// # Errors
///
/// Returns `InvalidInput` for rejected queries and propagates upstream failures
pub async fn search_foods(
    source: &dyn FoodDataSource,
    raw_query: &str,
    page_size: u32,
) -> AppResult<SearchOutcome> {
    match SearchQuery::parse(raw_query)? {
        SearchQuery::Blank => Ok(SearchOutcome::blank(raw_query)),
        SearchQuery::Text(text) => {
            let results = source.search_foods(&text, page_size).await?;
            debug!(query = %text, source = source.name(), results = results.len(), "Food search");
            Ok(SearchOutcome::from_results(raw_query, results))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_single_characters() {
        for raw in ["/", "\\", "[", "]"] {
            assert!(SearchQuery::parse(raw).is_err(), "{raw} should be rejected");
        }
        assert_eq!(
            SearchQuery::parse("[apple]").unwrap(),
            SearchQuery::Text("[apple]".to_owned())
        );
    }

    #[test]
    fn test_blank_queries() {
        assert_eq!(SearchQuery::parse("").unwrap(), SearchQuery::Blank);
        assert_eq!(SearchQuery::parse("   ").unwrap(), SearchQuery::Blank);
    }

    #[test]
    fn test_empty_results_carry_message() {
        let outcome = SearchOutcome::from_results("zzz", Vec::new());
        assert_eq!(outcome.message, Some("No matching food items."));
        assert!(SearchOutcome::blank("").message.is_none());
    }
}
