// ABOUTME: Mock USDA FoodData Central source serving fixed records without network access
// ABOUTME: One fixture per record category, used by unit and integration tests

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::usda_client::{food_not_found, validate_search_request};
use super::{FoodDataSource, FoodSearchResult};
use crate::errors::AppResult;
use async_trait::async_trait;
use nutrition_core::RawFoodRecord;
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn nutrient(id: u64, number: &str, name: &str, amount: f64, unit: &str) -> Value {
    json!({
        "type": "FoodNutrient",
        "id": id,
        "amount": amount,
        "nutrient": { "id": id, "number": number, "name": name, "unitName": unit }
    })
}

fn apple() -> Value {
    json!({
        "fdcId": MockUsdaClient::APPLE,
        "dataType": "SR Legacy",
        "description": "Apples, raw, with skin (Includes foods for USDA's Food Distribution Program)",
        "foodNutrients": [
            nutrient(1003, "203", "Protein", 0.26, "g"),
            nutrient(1004, "204", "Total lipid (fat)", 0.17, "g"),
            nutrient(1005, "205", "Carbohydrate, by difference", 13.81, "g"),
            nutrient(1008, "208", "Energy", 52.0, "kcal"),
            nutrient(1087, "301", "Calcium, Ca", 6.0, "mg"),
            nutrient(1089, "303", "Iron, Fe", 0.12, "mg"),
            nutrient(1092, "306", "Potassium, K", 107.0, "mg"),
            nutrient(1093, "307", "Sodium, Na", 1.0, "mg"),
            nutrient(1162, "401", "Vitamin C, total ascorbic acid", 4.6, "mg")
        ],
        "foodPortions": [
            { "id": 91_450, "gramWeight": 125.0, "amount": 1.0, "modifier": "cup, quartered or chopped" },
            { "id": 91_451, "gramWeight": 182.0, "amount": 1.0, "modifier": "medium (3\" dia)" },
            { "id": 91_452, "gramWeight": 109.0, "amount": 1.0, "modifier": "cup slices" },
            { "id": 91_453, "gramWeight": 125.0, "amount": 1.0, "modifier": "NLEA serving" }
        ]
    })
}

fn chicken_breast() -> Value {
    json!({
        "fdcId": MockUsdaClient::CHICKEN_BREAST,
        "dataType": "SR Legacy",
        "description": "Chicken, broilers or fryers, breast, meat only, cooked, roasted",
        "foodNutrients": [
            nutrient(1003, "203", "Protein", 31.02, "g"),
            nutrient(1004, "204", "Total lipid (fat)", 3.57, "g"),
            nutrient(1005, "205", "Carbohydrate, by difference", 0.0, "g"),
            nutrient(1008, "208", "Energy", 165.0, "kcal"),
            nutrient(1253, "601", "Cholesterol", 85.0, "mg"),
            nutrient(1258, "606", "Fatty acids, total saturated", 1.01, "g")
        ],
        "foodPortions": [
            { "gramWeight": 140.0, "amount": 1.0, "modifier": "cup, chopped or diced" },
            { "gramWeight": 86.0, "amount": 0.5, "modifier": "breast, bone and skin removed" }
        ]
    })
}

fn green_beans() -> Value {
    json!({
        "fdcId": MockUsdaClient::GREEN_BEANS,
        "dataType": "Foundation",
        "description": "Beans, snap, green, raw",
        "foodNutrients": [
            nutrient(1003, "203", "Protein", 1.97, "g"),
            nutrient(1004, "204", "Total lipid (fat)", 0.275, "g"),
            nutrient(1005, "205", "Carbohydrate, by difference", 7.41, "g"),
            nutrient(1087, "301", "Calcium, Ca", 42.0, "mg")
        ],
        "foodPortions": [
            { "gramWeight": 110.0, "portionDescription": "1 cup" }
        ]
    })
}

fn whole_milk() -> Value {
    json!({
        "fdcId": MockUsdaClient::WHOLE_MILK,
        "dataType": "Survey (FNDDS)",
        "description": "Milk, whole",
        "foodNutrients": [
            nutrient(1003, "203", "Protein", 3.27, "g"),
            nutrient(1004, "204", "Total lipid (fat)", 3.2, "g"),
            nutrient(1008, "208", "Energy", 61.0, "kcal"),
            nutrient(1087, "301", "Calcium, Ca", 123.0, "mg")
        ],
        "foodPortions": [
            { "gramWeight": 244.0, "portionDescription": "1 cup" },
            { "gramWeight": 30.5, "portionDescription": "1 fl oz" },
            { "gramWeight": 244.0, "portionDescription": "Quantity not specified" }
        ]
    })
}

fn chocolate_chip_cookies() -> Value {
    json!({
        "fdcId": MockUsdaClient::CHOCOLATE_CHIP_COOKIES,
        "dataType": "Branded",
        "description": "CHOCOLATE CHIP COOKIES",
        "brandOwner": "Example Bakery Co.",
        "householdServingFullText": "3 COOKIES",
        "ingredients": "ENRICHED FLOUR, SUGAR, SEMI-SWEET CHOCOLATE CHIPS, BUTTER, EGGS",
        "labelNutrients": {
            "fat": { "value": 11.0 },
            "saturatedFat": { "value": 5.0 },
            "sodium": { "value": 120.0 },
            "carbohydrates": { "value": 22.0 },
            "sugars": { "value": 12.0 },
            "protein": { "value": 2.0 },
            "calories": { "value": 250.0 }
        }
    })
}

fn experimental_beef() -> Value {
    json!({
        "fdcId": MockUsdaClient::EXPERIMENTAL_BEEF,
        "dataType": "Experimental",
        "description": "Beef, loin, tenderloin roast, separable lean only, boneless, trimmed, raw"
    })
}

fn incomplete_survey() -> Value {
    json!({
        "fdcId": MockUsdaClient::INCOMPLETE_SURVEY,
        "dataType": "Survey (FNDDS)",
        "description": "Rice, white, cooked, no added fat",
        "foodNutrients": [nutrient(1008, "208", "Energy", 130.0, "kcal")]
    })
}

/// Mock USDA client for testing (no API calls)
#[derive(Debug, Clone)]
pub struct MockUsdaClient {
    records: BTreeMap<u64, RawFoodRecord>,
}

impl MockUsdaClient {
    /// SR Legacy record with several portions
    pub const APPLE: u64 = 171_688;
    /// SR Legacy record with fractional portion amounts
    pub const CHICKEN_BREAST: u64 = 171_477;
    /// Foundation record whose upstream portions are ignored
    pub const GREEN_BEANS: u64 = 2_346_400;
    /// Survey (FNDDS) record with a duplicate gram weight
    pub const WHOLE_MILK: u64 = 2_705_385;
    /// Branded record with a per-serving label
    pub const CHOCOLATE_CHIP_COOKIES: u64 = 2_041_155;
    /// Experimental record with no nutrition data
    pub const EXPERIMENTAL_BEEF: u64 = 1_999_631;
    /// Survey (FNDDS) record that lacks `foodPortions`
    pub const INCOMPLETE_SURVEY: u64 = 2_705_999;

    /// Create a new mock client with predefined test data
    #[must_use]
    pub fn new() -> Self {
        let records = [
            (Self::APPLE, apple()),
            (Self::CHICKEN_BREAST, chicken_breast()),
            (Self::GREEN_BEANS, green_beans()),
            (Self::WHOLE_MILK, whole_milk()),
            (Self::CHOCOLATE_CHIP_COOKIES, chocolate_chip_cookies()),
            (Self::EXPERIMENTAL_BEEF, experimental_beef()),
            (Self::INCOMPLETE_SURVEY, incomplete_survey()),
        ]
        .into_iter()
        .map(|(fdc_id, value)| (fdc_id, RawFoodRecord::new(value)))
        .collect();

        Self { records }
    }

    /// Add or replace a fixture record
    #[must_use]
    pub fn with_record(mut self, fdc_id: u64, record: Value) -> Self {
        self.records.insert(fdc_id, RawFoodRecord::new(record));
        self
    }

    fn search_result(fdc_id: u64, record: &RawFoodRecord) -> FoodSearchResult {
        let value = record.as_value();
        FoodSearchResult {
            fdc_id,
            description: record.description().unwrap_or_default().to_owned(),
            data_type: record
                .data_type()
                .map(|data_type| data_type.as_str().to_owned())
                .unwrap_or_default(),
            publication_date: None,
            brand_owner: value
                .get("brandOwner")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

impl Default for MockUsdaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FoodDataSource for MockUsdaClient {
    async fn fetch_food_record(&self, fdc_id: u64) -> AppResult<RawFoodRecord> {
        self.records
            .get(&fdc_id)
            .cloned()
            .ok_or_else(|| food_not_found(fdc_id))
    }

    async fn search_foods(&self, query: &str, page_size: u32) -> AppResult<Vec<FoodSearchResult>> {
        validate_search_request(query, page_size)?;

        let query_lower = query.trim().to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|(_, record)| {
                record
                    .description()
                    .is_some_and(|description| description.to_lowercase().contains(&query_lower))
            })
            .take(page_size as usize)
            .map(|(fdc_id, record)| Self::search_result(*fdc_id, record))
            .collect())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
