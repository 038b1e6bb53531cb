// ABOUTME: Reconciles category-specific FoodData Central records into one display model
// ABOUTME: Exhaustive dispatch on dataType into Standard, Branded or Experimental outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food record normalization.
//!
//! | `dataType`          | nutrients                    | portions                                   |
//! |---------------------|------------------------------|--------------------------------------------|
//! | Experimental        | none                         | none                                       |
//! | Branded             | `labelNutrients` map         | n/a (label is per serving)                 |
//! | Foundation          | `foodNutrients` flattened    | synthetic 100 g only                       |
//! | SR Legacy           | `foodNutrients` flattened    | `foodPortions` (amount + modifier) or 100 g |
//! | anything else       | `foodNutrients` flattened    | `foodPortions` (required)                  |
//!
//! Portions are filtered to positive finite gram weights and deduplicated by gram
//! weight (first occurrence wins). An empty result gets the synthetic 100 g portion.

use crate::errors::NormalizeError;
use crate::portion::{dedup_portions, Portion};
use crate::record::{
    BrandedShape, DataType, LegacyPortion, LegacyPortionsShape, RawFoodNutrient, RawFoodRecord,
    StandardShape, SurveyPortion, SurveyPortionsShape,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One nutrient of a non-branded record, amount per 100 g (or mL)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientReading {
    /// Upstream food-nutrient id
    pub id: u64,
    /// Raw upstream nutrient name
    pub name: String,
    /// Amount per 100 g baseline
    pub amount: f64,
    /// Upstream unit name (`g`, `mg`, `kcal`, ...)
    pub unit_name: String,
}

impl From<RawFoodNutrient> for NutrientReading {
    fn from(raw: RawFoodNutrient) -> Self {
        Self {
            id: raw.id.or(raw.nutrient.id).unwrap_or_default(),
            name: raw.nutrient.name,
            amount: raw.amount.unwrap_or(0.0),
            unit_name: raw.nutrient.unit_name.unwrap_or_default(),
        }
    }
}

/// One entry of a branded record's nutrition label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelNutrient {
    /// Raw label key (`calories`, `saturatedFat`, ...)
    pub nutrient: String,
    /// Per-serving value
    pub value: f64,
    /// Display unit; unset until presentation assigns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
}

/// Normalized record for Foundation, SR Legacy, Survey and other per-100 g categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardFoodDetail {
    /// Food description
    pub description: String,
    /// Nutrient readings in upstream order
    pub nutrients: Vec<NutrientReading>,
    /// Selectable serving sizes with unique gram weights, never empty after normalization
    pub portions: Vec<Portion>,
}

impl StandardFoodDetail {
    /// The portion selected when the user has not chosen one
    #[must_use]
    pub fn default_portion(&self) -> Portion {
        self.portions.first().cloned().unwrap_or_else(Portion::baseline)
    }

    /// The offered portion with exactly this gram weight
    #[must_use]
    pub fn find_portion(&self, gram_weight: f64) -> Option<&Portion> {
        self.portions
            .iter()
            .find(|portion| (portion.gram_weight - gram_weight).abs() < f64::EPSILON)
    }
}

/// Normalized record for the Branded category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandedFoodDetail {
    /// Food description
    pub description: String,
    /// Household serving text (`householdServingFullText`)
    pub serving_size_text: String,
    /// Ingredient list
    pub ingredients_text: String,
    /// Label nutrients, one per `labelNutrients` key
    pub label_nutrients: Vec<LabelNutrient>,
}

/// Uniform representation of a record that carries nutrition data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NormalizedFoodDetail {
    /// Per-100 g nutrient table with selectable portions
    Standard(StandardFoodDetail),
    /// Fixed per-serving label
    Branded(BrandedFoodDetail),
}

impl NormalizedFoodDetail {
    /// Food description
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Standard(detail) => &detail.description,
            Self::Branded(detail) => &detail.description,
        }
    }
}

/// Marker for records whose category carries no nutrition data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentalMarker {
    /// Description, when the record has one
    pub description: Option<String>,
}

/// Result of normalizing a record that matched a known shape
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    /// Record with nutrition data
    Detail(NormalizedFoodDetail),
    /// Experimental record: no nutrition data is available
    Experimental(ExperimentalMarker),
}

impl NormalizeOutcome {
    /// The normalized detail, unless the record is experimental
    #[must_use]
    pub const fn detail(&self) -> Option<&NormalizedFoodDetail> {
        match self {
            Self::Detail(detail) => Some(detail),
            Self::Experimental(_) => None,
        }
    }

    /// Whether this is the experimental marker
    #[must_use]
    pub const fn is_experimental(&self) -> bool {
        matches!(self, Self::Experimental(_))
    }
}

/// Normalize a raw upstream record.
///
/// # Errors
///
/// - [`NormalizeError::UnrecognizedShape`] when `dataType` is missing or the fields a
///   category requires are absent or mistyped
/// - [`NormalizeError::MissingPortionData`] when a category that must carry
///   `foodPortions` has none
pub fn normalize(raw: &RawFoodRecord) -> Result<NormalizeOutcome, NormalizeError> {
    let data_type = raw
        .data_type()
        .ok_or_else(|| NormalizeError::unrecognized("unknown", "missing or non-string dataType"))?;

    let outcome = match &data_type {
        DataType::Experimental => NormalizeOutcome::Experimental(ExperimentalMarker {
            description: raw.description().map(str::to_owned),
        }),
        DataType::Branded => {
            NormalizeOutcome::Detail(NormalizedFoodDetail::Branded(normalize_branded(raw, &data_type)?))
        }
        DataType::Foundation => {
            let standard = read_standard(raw, &data_type)?;
            NormalizeOutcome::Detail(standard.into_detail(vec![Portion::baseline()]))
        }
        DataType::SrLegacy => {
            let standard = read_standard(raw, &data_type)?;
            let shape: LegacyPortionsShape = raw.read_shape(&data_type)?;
            let portions = shape
                .food_portions
                .unwrap_or_default()
                .into_iter()
                .map(LegacyPortion::into_portion);
            NormalizeOutcome::Detail(standard.into_detail(finalize_portions(portions)))
        }
        DataType::SurveyFndds | DataType::Other(_) => {
            let standard = read_standard(raw, &data_type)?;
            let shape: SurveyPortionsShape = raw.read_shape(&data_type)?;
            let portions = shape
                .food_portions
                .ok_or_else(|| NormalizeError::missing_portions(data_type.as_str()))?
                .into_iter()
                .map(SurveyPortion::into_portion);
            NormalizeOutcome::Detail(standard.into_detail(finalize_portions(portions)))
        }
    };

    debug!(
        data_type = %data_type,
        experimental = outcome.is_experimental(),
        "Normalized food record"
    );
    Ok(outcome)
}

/// Description and flattened nutrients of a non-branded record
struct StandardParts {
    description: String,
    nutrients: Vec<NutrientReading>,
}

impl StandardParts {
    fn into_detail(self, portions: Vec<Portion>) -> NormalizedFoodDetail {
        NormalizedFoodDetail::Standard(StandardFoodDetail {
            description: self.description,
            nutrients: self.nutrients,
            portions,
        })
    }
}

fn read_standard(raw: &RawFoodRecord, data_type: &DataType) -> Result<StandardParts, NormalizeError> {
    let shape: StandardShape = raw.read_shape(data_type)?;
    Ok(StandardParts {
        description: shape.description,
        nutrients: shape.food_nutrients.into_iter().map(NutrientReading::from).collect(),
    })
}

fn normalize_branded(
    raw: &RawFoodRecord,
    data_type: &DataType,
) -> Result<BrandedFoodDetail, NormalizeError> {
    let shape: BrandedShape = raw.read_shape(data_type)?;
    let label_nutrients = shape
        .label_nutrients
        .into_iter()
        .map(|(nutrient, label)| LabelNutrient {
            nutrient,
            value: label.value,
            unit_name: None,
        })
        .collect();

    Ok(BrandedFoodDetail {
        description: shape.description,
        serving_size_text: shape.household_serving_full_text.unwrap_or_default(),
        ingredients_text: shape.ingredients.unwrap_or_default(),
        label_nutrients,
    })
}

/// Drop unusable gram weights, deduplicate, and fall back to the 100 g portion
fn finalize_portions(portions: impl Iterator<Item = Portion>) -> Vec<Portion> {
    let usable = portions.filter(|portion| {
        let usable = portion.is_usable();
        if !usable {
            debug!(gram_weight = portion.gram_weight, "Dropping unusable portion");
        }
        usable
    });
    let deduped = dedup_portions(usable);
    if deduped.is_empty() {
        vec![Portion::baseline()]
    } else {
        deduped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nutrient(id: u64, name: &str, amount: f64, unit: &str) -> serde_json::Value {
        json!({
            "id": id,
            "amount": amount,
            "nutrient": { "id": id + 1000, "name": name, "unitName": unit }
        })
    }

    #[test]
    fn test_missing_data_type_is_unrecognized() {
        let raw = RawFoodRecord::new(json!({ "description": "Mystery" }));
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, NormalizeError::UnrecognizedShape { .. }));
    }

    #[test]
    fn test_experimental_needs_no_other_fields() {
        let raw = RawFoodRecord::new(json!({ "dataType": "Experimental" }));
        let outcome = normalize(&raw).unwrap();
        assert!(outcome.is_experimental());
        assert!(outcome.detail().is_none());
    }

    #[test]
    fn test_foundation_ignores_upstream_portions() {
        let raw = RawFoodRecord::new(json!({
            "dataType": "Foundation",
            "description": "Hummus, commercial",
            "foodNutrients": [nutrient(1, "Protein", 7.35, "g")],
            "foodPortions": [{ "gramWeight": 15.0, "portionDescription": "1 tbsp" }]
        }));
        let Some(NormalizedFoodDetail::Standard(detail)) = normalize(&raw).unwrap().detail().cloned() else {
            panic!("expected standard detail");
        };
        assert_eq!(detail.portions, vec![Portion::baseline()]);
        assert_eq!(detail.nutrients[0].name, "Protein");
    }

    #[test]
    fn test_nutrient_flattening_defaults() {
        let raw = RawFoodRecord::new(json!({
            "dataType": "Foundation",
            "description": "Water",
            "foodNutrients": [{ "nutrient": { "id": 1003, "name": "Protein" } }]
        }));
        let Some(NormalizedFoodDetail::Standard(detail)) = normalize(&raw).unwrap().detail().cloned() else {
            panic!("expected standard detail");
        };
        let reading = &detail.nutrients[0];
        assert_eq!(reading.id, 1003);
        assert!(reading.amount.abs() < f64::EPSILON);
        assert_eq!(reading.unit_name, "");
    }

    #[test]
    fn test_survey_without_portions_is_missing_portion_data() {
        let raw = RawFoodRecord::new(json!({
            "dataType": "Survey (FNDDS)",
            "description": "Milk, whole",
            "foodNutrients": []
        }));
        assert_eq!(
            normalize(&raw).unwrap_err(),
            NormalizeError::missing_portions("Survey (FNDDS)")
        );
    }

    #[test]
    fn test_non_numeric_gram_weight_is_unrecognized() {
        let raw = RawFoodRecord::new(json!({
            "dataType": "Survey (FNDDS)",
            "description": "Milk, whole",
            "foodNutrients": [],
            "foodPortions": [{ "gramWeight": "a cup", "portionDescription": "1 cup" }]
        }));
        assert!(matches!(
            normalize(&raw).unwrap_err(),
            NormalizeError::UnrecognizedShape { .. }
        ));
    }

    #[test]
    fn test_finalize_portions_falls_back_when_nothing_usable() {
        let portions = vec![Portion::new(0.0, "none"), Portion::new(-5.0, "negative")];
        assert_eq!(finalize_portions(portions.into_iter()), vec![Portion::baseline()]);
    }
}
