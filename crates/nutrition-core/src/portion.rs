// ABOUTME: Serving-size model and rescaling of per-100 g nutrient amounts
// ABOUTME: Hundredth rounding robust to binary floating-point representation error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::BASELINE_GRAM_WEIGHT;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One selectable serving size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portion {
    /// Weight of the serving in grams
    pub gram_weight: f64,
    /// Human readable serving description (may be empty)
    pub description: String,
}

impl Portion {
    /// Create a portion
    #[must_use]
    pub fn new(gram_weight: f64, description: impl Into<String>) -> Self {
        Self {
            gram_weight,
            description: description.into(),
        }
    }

    /// The synthetic 100 g portion used when a record offers none
    #[must_use]
    pub fn baseline() -> Self {
        Self::new(BASELINE_GRAM_WEIGHT, "")
    }

    /// Whether this portion can be offered as a serving size
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.gram_weight.is_finite() && self.gram_weight > 0.0
    }
}

/// Round to two decimal places, nudging by `f64::EPSILON` first so values such as
/// `1.005` land on the hundredth a person would expect.
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Rescale an amount measured per 100 g to `target_gram_weight` grams.
///
/// Total: a target of 0 yields 0.
#[must_use]
pub fn convert(amount_per_100: f64, target_gram_weight: f64) -> f64 {
    let factor = target_gram_weight / BASELINE_GRAM_WEIGHT;
    round_to_hundredths(amount_per_100 * factor)
}

/// Remove portions whose gram weight was already seen, keeping the first occurrence
/// and the original order.
#[must_use]
pub fn dedup_portions(portions: impl IntoIterator<Item = Portion>) -> Vec<Portion> {
    let mut seen = HashSet::new();
    portions
        .into_iter()
        .filter(|portion| seen.insert(gram_weight_key(portion.gram_weight)))
        .collect()
}

/// Hashable identity for a gram weight (`0.0` and `-0.0` collapse together)
fn gram_weight_key(gram_weight: f64) -> u64 {
    if gram_weight == 0.0 {
        0.0_f64.to_bits()
    } else {
        gram_weight.to_bits()
    }
}
