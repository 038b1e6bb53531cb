// ABOUTME: Loosely typed FoodData Central payloads and their category-specific shapes
// ABOUTME: Each category declares the fields it needs so schema drift surfaces as an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Raw upstream records.
//!
//! A [`RawFoodRecord`] is the untouched JSON body returned by `GET /food/{fdcId}`.
//! The fields present depend on `dataType`, so the record is only interpreted through
//! one of the shape structs below, selected by [`DataType`].

use crate::errors::NormalizeError;
use crate::portion::Portion;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Category of a FoodData Central record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Foundation Foods
    Foundation,
    /// SR Legacy Foods
    SrLegacy,
    /// Survey Foods (FNDDS)
    SurveyFndds,
    /// Branded Foods
    Branded,
    /// Experimental Foods
    Experimental,
    /// Any category this crate does not name explicitly
    Other(String),
}

impl DataType {
    /// Parse the upstream `dataType` string
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Foundation" => Self::Foundation,
            "SR Legacy" => Self::SrLegacy,
            "Survey (FNDDS)" => Self::SurveyFndds,
            "Branded" => Self::Branded,
            "Experimental" => Self::Experimental,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Upstream spelling of the category
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Foundation => "Foundation",
            Self::SrLegacy => "SR Legacy",
            Self::SurveyFndds => "Survey (FNDDS)",
            Self::Branded => "Branded",
            Self::Experimental => "Experimental",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untouched JSON food record as returned by the upstream API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFoodRecord(Value);

impl RawFoodRecord {
    /// Wrap a JSON payload
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the underlying JSON
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// The record's category, if `dataType` is present and a string
    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        self.0.get("dataType").and_then(Value::as_str).map(DataType::parse)
    }

    /// The record's `FoodData` Central id, if present
    #[must_use]
    pub fn fdc_id(&self) -> Option<u64> {
        self.0.get("fdcId").and_then(Value::as_u64)
    }

    /// The record's description, if present
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    /// Interpret the record as one category shape
    pub(crate) fn read_shape<T: DeserializeOwned>(
        &self,
        data_type: &DataType,
    ) -> Result<T, NormalizeError> {
        T::deserialize(&self.0)
            .map_err(|e| NormalizeError::unrecognized(data_type.as_str(), e.to_string()))
    }
}

impl From<Value> for RawFoodRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Fields shared by every non-branded category
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StandardShape {
    pub description: String,
    pub food_nutrients: Vec<RawFoodNutrient>,
}

/// `foodNutrients[]` entry: `{amount, id, nutrient: {id, name, unitName}}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFoodNutrient {
    pub id: Option<u64>,
    pub amount: Option<f64>,
    pub nutrient: RawNutrientInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNutrientInfo {
    pub id: Option<u64>,
    pub name: String,
    pub unit_name: Option<String>,
}

/// SR Legacy portions: `{gramWeight, amount, modifier}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyPortionsShape {
    pub food_portions: Option<Vec<LegacyPortion>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyPortion {
    pub gram_weight: f64,
    pub amount: Option<f64>,
    pub modifier: Option<String>,
}

impl LegacyPortion {
    /// Description is `"<amount> <modifier>"`, omitting whichever part is absent
    pub fn into_portion(self) -> Portion {
        let modifier = self.modifier.filter(|m| !m.is_empty());
        let description = match (self.amount, modifier) {
            (Some(amount), Some(modifier)) => format!("{amount} {modifier}"),
            (Some(amount), None) => amount.to_string(),
            (None, Some(modifier)) => modifier,
            (None, None) => String::new(),
        };
        Portion::new(self.gram_weight, description)
    }
}

/// Survey (FNDDS) and other categories: `{gramWeight, portionDescription}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SurveyPortionsShape {
    pub food_portions: Option<Vec<SurveyPortion>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SurveyPortion {
    pub gram_weight: f64,
    pub portion_description: Option<String>,
}

impl SurveyPortion {
    pub fn into_portion(self) -> Portion {
        Portion::new(self.gram_weight, self.portion_description.unwrap_or_default())
    }
}

/// Branded foods carry a per-serving label keyed by nutrient
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandedShape {
    pub description: String,
    pub household_serving_full_text: Option<String>,
    pub ingredients: Option<String>,
    pub label_nutrients: BTreeMap<String, LabelValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelValue {
    pub value: f64,
}
