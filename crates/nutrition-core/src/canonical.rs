// ABOUTME: Maps inconsistently formatted upstream nutrient labels to display names
// ABOUTME: First-match-wins rule list over exact and substring matches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrient name canonicalization.
//!
//! Upstream labels vary between categories ("Total lipid (fat)" in the standard
//! tables, `fat` or `saturatedFat` on branded labels). [`canonicalize`] folds them
//! into the fixed vocabulary the panel and the daily-value table understand.

/// How a rule compares against the capitalized input
#[derive(Debug, Clone, Copy)]
enum Match {
    Exact(&'static str),
    Contains(&'static str),
}

impl Match {
    fn matches(self, name: &str) -> bool {
        match self {
            Self::Exact(pattern) => name == pattern,
            Self::Contains(pattern) => name.contains(pattern),
        }
    }
}

/// Rules in evaluation order; the first match decides the display name
const RULES: [(Match, &str); 8] = [
    (Match::Exact("SaturatedFat"), "Saturated Fat"),
    (Match::Contains("Total lipid"), "Total Fat"),
    (Match::Contains("Fatty acids"), "Saturated Fat"),
    (Match::Exact("Energy"), "Calories"),
    (Match::Contains("Calcium"), "Calcium"),
    (Match::Contains("Vitamin E"), "Vitamin E"),
    (Match::Contains("Carbohydrate"), "Carbohydrate"),
    (Match::Exact("AddedSugar"), "Added Sugar"),
];

/// Upper-case the first character, leaving the rest untouched
fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Map a raw nutrient label to its canonical display name.
///
/// Total over all inputs: unmatched names come back with only their first
/// letter capitalized. Applying it to its own output returns the same string.
#[must_use]
pub fn canonicalize(raw_name: &str) -> String {
    let name = capitalize_first(raw_name);
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(&name))
        .map_or(name, |(_, canonical)| (*canonical).to_owned())
}
