// ABOUTME: Builds render-ready nutrition-facts rows and the panel model from normalized records
// ABOUTME: Applies portion scaling, name canonicalization, unit assignment and percent daily value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Detail presentation model.
//!
//! Rows are rebuilt from the immutable normalized record on every call; nothing here
//! mutates its input, so recomputing for the same portion always yields identical rows.

use crate::canonical::canonicalize;
use crate::constants::{
    fdc_source_url, CALORIES, DAILY_VALUE_FOOTNOTE, EXPERIMENTAL_MESSAGE, GRAM_NUTRIENTS,
    QUANTITY_NOT_SPECIFIED, UNIT_GRAMS, UNIT_MILLIGRAMS, UNIT_NONE,
};
use crate::daily_values::percent_of;
use crate::normalizer::{
    BrandedFoodDetail, ExperimentalMarker, LabelNutrient, NormalizeOutcome, NormalizedFoodDetail,
    NutrientReading, StandardFoodDetail,
};
use crate::portion::{convert, dedup_portions, Portion};
use serde::Serialize;

/// One line of the nutrition-facts table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    /// Canonical display name
    pub canonical_name: String,
    /// Amount for the selected serving
    pub amount: f64,
    /// Display unit (`g`, `mg`, or empty for calories)
    pub unit: &'static str,
    /// Amount followed by its unit, e.g. `12.5g`
    pub formatted_amount: String,
    /// Percent of the daily value, rounded to two decimals
    pub percent_daily_value: f64,
}

impl DisplayRow {
    fn new(canonical_name: String, amount: f64) -> Self {
        let unit = display_unit(&canonical_name);
        let percent_daily_value = percent_of(&canonical_name, amount);
        Self {
            formatted_amount: format!("{amount}{unit}"),
            canonical_name,
            amount,
            unit,
            percent_daily_value,
        }
    }
}

/// One entry of the serving-size selector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortionOption {
    /// `"<gramWeight> grams <description>"`
    pub label: String,
    /// Gram weight selected by this option
    pub gram_weight: f64,
}

/// Display unit for a canonical nutrient name
fn display_unit(canonical_name: &str) -> &'static str {
    if GRAM_NUTRIENTS.contains(&canonical_name) {
        UNIT_GRAMS
    } else if canonical_name == CALORIES {
        UNIT_NONE
    } else {
        UNIT_MILLIGRAMS
    }
}

/// Rows for a per-100 g record scaled to `selected_portion`.
///
/// Sorted once by raw upstream name (byte order) before names are canonicalized.
#[must_use]
pub fn render_standard(detail: &StandardFoodDetail, selected_portion: &Portion) -> Vec<DisplayRow> {
    let mut readings: Vec<&NutrientReading> = detail.nutrients.iter().collect();
    readings.sort_by(|a, b| a.name.cmp(&b.name));

    readings
        .into_iter()
        .map(|reading| {
            DisplayRow::new(
                canonicalize(&reading.name),
                convert(reading.amount, selected_portion.gram_weight),
            )
        })
        .collect()
}

/// Rows for a branded label; values are already per serving and are not rescaled
#[must_use]
pub fn render_branded(detail: &BrandedFoodDetail) -> Vec<DisplayRow> {
    let mut label: Vec<&LabelNutrient> = detail.label_nutrients.iter().collect();
    label.sort_by(|a, b| a.nutrient.cmp(&b.nutrient));

    label
        .into_iter()
        .map(|entry| DisplayRow::new(canonicalize(&entry.nutrient), entry.value))
        .collect()
}

/// Rows for any normalized record.
///
/// Standard records use `selected_portion`, or their first portion when none is given.
/// Branded records ignore the selection.
#[must_use]
pub fn render(detail: &NormalizedFoodDetail, selected_portion: Option<&Portion>) -> Vec<DisplayRow> {
    match detail {
        NormalizedFoodDetail::Standard(standard) => match selected_portion {
            Some(portion) => render_standard(standard, portion),
            None => render_standard(standard, &standard.default_portion()),
        },
        NormalizedFoodDetail::Branded(branded) => render_branded(branded),
    }
}

/// Serving-size options with unique gram weights, first occurrence first
#[must_use]
pub fn list_portion_options(detail: &StandardFoodDetail) -> Vec<PortionOption> {
    dedup_portions(detail.portions.iter().cloned())
        .into_iter()
        .map(|portion| {
            let description = if portion.description == QUANTITY_NOT_SPECIFIED {
                ""
            } else {
                portion.description.as_str()
            };
            PortionOption {
                label: format!("{} grams {description}", portion.gram_weight),
                gram_weight: portion.gram_weight,
            }
        })
        .collect()
}

/// Category-specific part of the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PanelBody {
    /// Per-100 g record with a serving-size selector
    #[serde(rename_all = "camelCase")]
    Standard {
        /// Serving-size selector entries
        portion_options: Vec<PortionOption>,
        /// Gram weight the rows are scaled to
        selected_gram_weight: f64,
        /// Table rows
        rows: Vec<DisplayRow>,
    },
    /// Branded per-serving label
    #[serde(rename_all = "camelCase")]
    Branded {
        /// Household serving text, lower-cased
        serving_size: String,
        /// Ingredient list, lower-cased
        ingredients: String,
        /// Table rows
        rows: Vec<DisplayRow>,
    },
    /// Experimental record without nutrition data
    Experimental {
        /// Explanation shown instead of a table
        message: &'static str,
    },
}

/// Everything a front-end needs to draw one food's detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFactsPanel {
    /// `FoodData` Central id
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Category-specific content
    #[serde(flatten)]
    pub body: PanelBody,
    /// Daily-value footnote
    pub footnote: &'static str,
    /// Link to the public `FoodData` Central page
    pub source_url: String,
}

impl NutritionFactsPanel {
    /// Build the panel for a normalized record
    #[must_use]
    pub fn from_detail(
        fdc_id: u64,
        detail: &NormalizedFoodDetail,
        selected_portion: Option<&Portion>,
    ) -> Self {
        let body = match detail {
            NormalizedFoodDetail::Standard(standard) => {
                let portion = selected_portion
                    .cloned()
                    .unwrap_or_else(|| standard.default_portion());
                PanelBody::Standard {
                    portion_options: list_portion_options(standard),
                    selected_gram_weight: portion.gram_weight,
                    rows: render_standard(standard, &portion),
                }
            }
            NormalizedFoodDetail::Branded(branded) => PanelBody::Branded {
                serving_size: branded.serving_size_text.to_lowercase(),
                ingredients: branded.ingredients_text.to_lowercase(),
                rows: render_branded(branded),
            },
        };
        Self::assemble(fdc_id, detail.description().to_owned(), body)
    }

    /// Build the explanatory panel for an experimental record
    #[must_use]
    pub fn experimental(fdc_id: u64, marker: &ExperimentalMarker) -> Self {
        Self::assemble(
            fdc_id,
            marker.description.clone().unwrap_or_default(),
            PanelBody::Experimental {
                message: EXPERIMENTAL_MESSAGE,
            },
        )
    }

    /// Build the panel for any normalization outcome
    #[must_use]
    pub fn from_outcome(
        fdc_id: u64,
        outcome: &NormalizeOutcome,
        selected_portion: Option<&Portion>,
    ) -> Self {
        match outcome {
            NormalizeOutcome::Detail(detail) => Self::from_detail(fdc_id, detail, selected_portion),
            NormalizeOutcome::Experimental(marker) => Self::experimental(fdc_id, marker),
        }
    }

    fn assemble(fdc_id: u64, description: String, body: PanelBody) -> Self {
        Self {
            fdc_id,
            description,
            body,
            footnote: DAILY_VALUE_FOOTNOTE,
            source_url: fdc_source_url(fdc_id),
        }
    }

    /// Table rows, empty for experimental records
    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        match &self.body {
            PanelBody::Standard { rows, .. } | PanelBody::Branded { rows, .. } => rows.as_slice(),
            PanelBody::Experimental { .. } => &[],
        }
    }
}
