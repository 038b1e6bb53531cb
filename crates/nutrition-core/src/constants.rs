// ABOUTME: Constants shared by the nutrition normalization and presentation layers
// ABOUTME: Unit vocabularies, placeholder strings, and the text shown around the panel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Upstream nutrient amounts for non-branded records are reported per this many grams
pub const BASELINE_GRAM_WEIGHT: f64 = 100.0;

/// Canonical names displayed in grams; every other nutrient except calories uses milligrams
pub const GRAM_NUTRIENTS: [&str; 5] = ["Carbohydrate", "Total Fat", "Fiber", "Sugars", "Protein"];

/// Canonical name of the energy row, which is shown without a unit
pub const CALORIES: &str = "Calories";

/// Unit suffix for nutrients in [`GRAM_NUTRIENTS`]
pub const UNIT_GRAMS: &str = "g";

/// Unit suffix for all remaining nutrients
pub const UNIT_MILLIGRAMS: &str = "mg";

/// Unit suffix for calories
pub const UNIT_NONE: &str = "";

/// Portion description the upstream API uses when it has nothing meaningful to say
pub const QUANTITY_NOT_SPECIFIED: &str = "Quantity not specified";

/// Footnote printed below every nutrition-facts table
pub const DAILY_VALUE_FOOTNOTE: &str = "The % Daily Value (DV) tells you how much a nutrient in a serving of food contributes to a daily diet.  2000 calories a day is used for general nutrition advice.";

/// Message shown instead of a table for Experimental records
pub const EXPERIMENTAL_MESSAGE: &str =
    "Food type is experimental. No nutritional information is available.";

/// Public FoodData Central page for a food item, before the id
pub const FDC_FOOD_DETAILS_URL_PREFIX: &str = "https://fdc.nal.usda.gov/fdc-app.html#/food-details/";

/// Build the public FoodData Central link for a food item
#[must_use]
pub fn fdc_source_url(fdc_id: u64) -> String {
    format!("{FDC_FOOD_DETAILS_URL_PREFIX}{fdc_id}/nutrients")
}
