// ABOUTME: Core library for turning raw FoodData Central records into nutrition-facts rows
// ABOUTME: Pure, synchronous normalization, canonicalization, scaling and daily-value math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Core
//!
//! The upstream food database reports nutrition data in several incompatible shapes
//! depending on a record's `dataType`. This crate reconciles those shapes into one
//! display model and derives the quantities shown on a nutrition-facts panel.
//!
//! ## Modules
//!
//! - **record**: Loosely typed raw records and the per-category input shapes
//! - **normalizer**: Category dispatch producing a [`NormalizedFoodDetail`]
//! - **canonical**: Raw nutrient label to display name mapping
//! - **`daily_values`**: Static FDA daily-value reference table
//! - **portion**: Serving sizes and per-100 g rescaling
//! - **presentation**: Render-ready rows, portion options and the panel model
//!
//! Every function here is pure and free of shared mutable state, so callers may invoke
//! them concurrently without coordination.

/// Shared constants (unit sets, placeholder strings, panel text)
pub mod constants;

/// Normalization error types
pub mod errors;

/// Nutrient name canonicalization
pub mod canonical;

/// FDA daily-value reference table and percent computation
pub mod daily_values;

/// Portion type, deduplication and per-100 g rescaling
pub mod portion;

/// Raw upstream records and category-specific shapes
pub mod record;

/// Category dispatch from raw records to the normalized model
pub mod normalizer;

/// Display rows and the nutrition-facts panel model
pub mod presentation;

pub use canonical::canonicalize;
pub use daily_values::{percent_of, DailyValueEntry, DailyValueTable};
pub use errors::NormalizeError;
pub use normalizer::{
    normalize, BrandedFoodDetail, ExperimentalMarker, LabelNutrient, NormalizeOutcome,
    NormalizedFoodDetail, NutrientReading, StandardFoodDetail,
};
pub use portion::{convert, dedup_portions, round_to_hundredths, Portion};
pub use presentation::{
    list_portion_options, render, render_branded, render_standard, DisplayRow,
    NutritionFactsPanel, PanelBody, PortionOption,
};
pub use record::{DataType, RawFoodRecord};
