// ABOUTME: Food search and nutrition-facts detail route handlers
// ABOUTME: Fetches raw records, normalizes them and returns render-ready panel JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food routes
//!
//! - `GET /api/foods/search?query=&page_size=` returns drop-down options
//! - `GET /api/foods/:fdc_id?portion=` returns the nutrition-facts panel

use crate::constants::routes;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::search::{search_foods, SearchOutcome};
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use nutrition_core::{
    normalize, NormalizeOutcome, NormalizedFoodDetail, NutritionFactsPanel, Portion,
    RawFoodRecord,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query string of the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search-box text; absent means blank
    #[serde(default)]
    pub query: String,
    /// Result count override
    pub page_size: Option<u32>,
}

/// Query string of the detail endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    /// Selected portion gram weight
    pub portion: Option<String>,
}

/// Food search and detail routes
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::FOOD_SEARCH, get(Self::handle_search))
            .route(routes::FOOD_DETAIL, get(Self::handle_detail))
            .with_state(resources)
    }

    /// Handle search-box queries
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<SearchParams>,
    ) -> AppResult<Json<SearchOutcome>> {
        let page_size = params
            .page_size
            .unwrap_or(resources.config.usda.search_page_size);
        let outcome = search_foods(resources.food_source.as_ref(), &params.query, page_size).await?;
        Ok(Json(outcome))
    }

    /// Handle nutrition-facts detail requests
    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        Path(raw_id): Path<String>,
        Query(params): Query<DetailParams>,
    ) -> AppResult<Json<NutritionFactsPanel>> {
        let fdc_id = parse_fdc_id(&raw_id)?;
        let selected_gram_weight = params.portion.as_deref().map(parse_gram_weight).transpose()?;

        let raw = resources.food_source.fetch_food_record(fdc_id).await?;
        let panel = build_panel(fdc_id, &raw, selected_gram_weight)?;
        Ok(Json(panel))
    }
}

fn parse_fdc_id(raw: &str) -> AppResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::invalid_input(format!("Food id must be a positive integer, got {raw:?}")))
}

fn parse_gram_weight(raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|gram_weight| gram_weight.is_finite() && *gram_weight > 0.0)
        .ok_or_else(|| AppError::invalid_input(format!("Portion must be a positive gram weight, got {raw:?}")))
}

/// Normalize a raw record and build its panel for the selected gram weight.
///
/// The gram weight only applies to per-100 g records; branded labels and
/// experimental records ignore it.
///
/// # Errors
///
/// Returns the normalization error mapped to an upstream error code, or
/// `InvalidInput` when the gram weight is not one of the record's portions
pub fn build_panel(
    fdc_id: u64,
    raw: &RawFoodRecord,
    selected_gram_weight: Option<f64>,
) -> AppResult<NutritionFactsPanel> {
    let data_type = raw
        .data_type()
        .map_or_else(|| "unknown".to_owned(), |data_type| data_type.to_string());

    let outcome = normalize(raw).map_err(|e| {
        AppLogger::log_normalization_failure(fdc_id, &e.to_string());
        AppError::from(e).with_resource_id(fdc_id.to_string())
    })?;

    let selected_portion = match (&outcome, selected_gram_weight) {
        (NormalizeOutcome::Detail(NormalizedFoodDetail::Standard(detail)), Some(gram_weight)) => {
            Some(select_portion(detail.find_portion(gram_weight), gram_weight)?)
        }
        _ => None,
    };

    let panel = NutritionFactsPanel::from_outcome(fdc_id, &outcome, selected_portion.as_ref());
    let kind = if outcome.is_experimental() {
        "experimental"
    } else {
        "detail"
    };
    AppLogger::log_normalization(fdc_id, &data_type, kind, panel.rows().len());
    Ok(panel)
}

fn select_portion(found: Option<&Portion>, gram_weight: f64) -> AppResult<Portion> {
    found
        .cloned()
        .ok_or_else(|| AppError::invalid_input(format!("{gram_weight} grams is not an offered portion")))
}
