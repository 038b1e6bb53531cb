// ABOUTME: FDA daily-value reference table and percent-of-daily-value computation
// ABOUTME: Bidirectional substring lookup with first-match-wins in declaration order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily value reference data.
//!
//! Source: <https://www.fda.gov/food/new-nutrition-facts-label/daily-value-new-nutrition-and-supplement-facts-labels>
//!
//! Reference names keep the upstream spelling ("Iron, Fe", "Calcium,Ca") so that both raw
//! upstream labels and canonical display names find them by substring.

use crate::portion::round_to_hundredths;
use serde::Serialize;

/// One row of the reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyValueEntry {
    /// Reference nutrient name
    pub nutrient: &'static str,
    /// Recommended daily amount (always positive)
    pub reference_amount: f64,
}

const fn entry(nutrient: &'static str, reference_amount: f64) -> DailyValueEntry {
    DailyValueEntry {
        nutrient,
        reference_amount,
    }
}

static DAILY_VALUES: DailyValueTable = DailyValueTable {
    entries: &[
        entry("Protein", 50.0),
        entry("Calcium,Ca", 1300.0),
        entry("Total Fat", 78.0),
        entry("Iron, Fe", 18.0),
        entry("Magnesium, Mg", 420.0),
        entry("Phosphorus, P", 1520.0),
        entry("Potassium, K", 4700.0),
        entry("Sodium, Na", 2300.0),
        entry("Zinc, Zn", 11.0),
        entry("Copper, Cu", 0.9),
        entry("Vitamin C, total ascorbic acid", 90.0),
        entry("Vitamin A, RAE", 900.0),
        entry("Vitamin E", 15.0),
        entry("Cholesterol", 300.0),
        entry("Carbohydrate", 275.0),
        entry("Added Sugars", 50.0),
        entry("Saturated Fat", 20.0),
        entry("Trans Fat", 2.2),
        entry("Fiber", 28.0),
        entry("Calories", 2000.0),
    ],
};

/// Immutable daily-value reference table
#[derive(Debug)]
pub struct DailyValueTable {
    entries: &'static [DailyValueEntry],
}

impl DailyValueTable {
    /// The process-wide FDA reference table
    #[must_use]
    pub fn global() -> &'static Self {
        &DAILY_VALUES
    }

    /// All entries in declaration order
    #[must_use]
    pub const fn entries(&self) -> &'static [DailyValueEntry] {
        self.entries
    }

    /// First entry whose name contains the trimmed input, or is contained by it
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static DailyValueEntry> {
        let trimmed = name.trim();
        self.entries
            .iter()
            .find(|dv| trimmed.contains(dv.nutrient) || dv.nutrient.contains(trimmed))
    }

    /// Percent of the daily value `amount` represents, rounded to two decimals.
    ///
    /// Returns 0 when no reference entry matches.
    #[must_use]
    pub fn percent_of(&self, name: &str, amount: f64) -> f64 {
        self.lookup(name).map_or(0.0, |dv| {
            round_to_hundredths((amount / dv.reference_amount) * 100.0)
        })
    }
}

/// Percent of daily value using the global table
#[must_use]
pub fn percent_of(canonical_name: &str, amount: f64) -> f64 {
    DailyValueTable::global().percent_of(canonical_name, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_twenty_positive_entries() {
        let entries = DailyValueTable::global().entries();
        assert_eq!(entries.len(), 20);
        assert!(entries.iter().all(|dv| dv.reference_amount > 0.0));
    }

    #[test]
    fn test_exact_references() {
        assert!((percent_of("Calories", 2000.0) - 100.0).abs() < f64::EPSILON);
        assert!((percent_of("Protein", 25.0) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_canonical_name_inside_reference_name() {
        // "Calcium" is contained in "Calcium,Ca"
        assert!((percent_of("Calcium", 130.0) - 10.0).abs() < 1e-9);
        // "Sodium" is contained in "Sodium, Na"
        assert!((percent_of("Sodium", 230.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_name_inside_input() {
        assert!((percent_of("Iron, Fe", 9.0) - 50.0).abs() < 1e-9);
        assert!((percent_of("  Cholesterol  ", 30.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_match_wins() {
        // "Fat" matches "Total Fat" before "Saturated Fat" or "Trans Fat"
        let dv = DailyValueTable::global().lookup("Fat").unwrap();
        assert_eq!(dv.nutrient, "Total Fat");
        // "Sugars" is found inside "Added Sugars"
        let dv = DailyValueTable::global().lookup("Sugars").unwrap();
        assert_eq!(dv.nutrient, "Added Sugars");
    }

    #[test]
    fn test_unmatched_is_zero() {
        assert!(percent_of("Sodium, sodium chloride", 500.0).abs() < f64::EPSILON);
        assert!(percent_of("Caffeine", 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rounding() {
        // 1 / 3 of the protein reference
        assert!((percent_of("Protein", 50.0 / 3.0) - 33.33).abs() < 1e-9);
    }
}
