// ABOUTME: Integration tests for the food search and nutrition-facts detail routes
// ABOUTME: Exercises every record category through the full router over the mock source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{mock_resources, mock_router};
use helpers::axum_test::AxumTestRequest;
use nutrition_facts_server::external::MockUsdaClient;
use nutrition_facts_server::server::build_router;
use serde_json::{json, Value};

fn row<'a>(panel: &'a Value, canonical_name: &str) -> &'a Value {
    panel["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["canonicalName"] == canonical_name)
        .unwrap_or_else(|| panic!("no row named {canonical_name}"))
}

fn close(value: &Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-9
}

// ============================================================================
// Detail: standard records
// ============================================================================

#[tokio::test]
async fn test_sr_legacy_detail_defaults_to_first_portion() {
    let response = AxumTestRequest::get(&format!("/api/foods/{}", MockUsdaClient::APPLE))
        .send(mock_router())
        .await;

    assert_eq!(response.status(), 200);
    let panel: Value = response.json();
    assert_eq!(panel["kind"], "standard");
    assert_eq!(panel["fdcId"], MockUsdaClient::APPLE);
    assert!(close(&panel["selectedGramWeight"], 125.0));

    let labels: Vec<&str> = panel["portionOptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|option| option["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        [
            "125 grams 1 cup, quartered or chopped",
            "182 grams 1 medium (3\" dia)",
            "109 grams 1 cup slices",
        ]
    );
    assert_eq!(
        panel["sourceUrl"],
        "https://fdc.nal.usda.gov/fdc-app.html#/food-details/171688/nutrients"
    );
    assert!(panel["footnote"].as_str().unwrap().starts_with("The % Daily Value (DV)"));
}

#[tokio::test]
async fn test_selected_portion_rescales_rows() {
    let response = AxumTestRequest::get(&format!(
        "/api/foods/{}?portion=182",
        MockUsdaClient::APPLE
    ))
    .send(mock_router())
    .await;

    assert_eq!(response.status(), 200);
    let panel: Value = response.json();
    assert!(close(&panel["selectedGramWeight"], 182.0));

    let calories = row(&panel, "Calories");
    assert!(close(&calories["amount"], 94.64));
    assert_eq!(calories["unit"], "");
    assert_eq!(calories["formattedAmount"], "94.64");
    assert!(close(&calories["percentDailyValue"], 4.73));

    let carbohydrate = row(&panel, "Carbohydrate");
    assert_eq!(carbohydrate["unit"], "g");

    let names: Vec<&str> = panel["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["canonicalName"].as_str().unwrap())
        .collect();
    assert_eq!(&names[..3], ["Calcium", "Carbohydrate", "Calories"]);
}

#[tokio::test]
async fn test_portion_not_offered_is_invalid_input() {
    let response = AxumTestRequest::get(&format!(
        "/api/foods/{}?portion=100",
        MockUsdaClient::APPLE
    ))
    .send(mock_router())
    .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_foundation_offers_only_baseline_portion() {
    let response = AxumTestRequest::get(&format!("/api/foods/{}", MockUsdaClient::GREEN_BEANS))
        .send(mock_router())
        .await;

    assert_eq!(response.status(), 200);
    let panel: Value = response.json();
    assert_eq!(
        panel["portionOptions"],
        json!([{ "label": "100 grams ", "gramWeight": 100.0 }])
    );
    assert!(close(&row(&panel, "Protein")["amount"], 1.97));
}

#[tokio::test]
async fn test_survey_duplicate_gram_weights_collapse() {
    let response = AxumTestRequest::get(&format!("/api/foods/{}", MockUsdaClient::WHOLE_MILK))
        .send(mock_router())
        .await;

    let panel: Value = response.json();
    let options = panel["portionOptions"].as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0]["label"], "244 grams 1 cup");
    assert_eq!(options[1]["label"], "30.5 grams 1 fl oz");
}

// ============================================================================
// Detail: branded and experimental records
// ============================================================================

#[tokio::test]
async fn test_branded_detail_uses_label_values() {
    let response = AxumTestRequest::get(&format!(
        "/api/foods/{}",
        MockUsdaClient::CHOCOLATE_CHIP_COOKIES
    ))
    .send(mock_router())
    .await;

    assert_eq!(response.status(), 200);
    let panel: Value = response.json();
    assert_eq!(panel["kind"], "branded");
    assert_eq!(panel["servingSize"], "3 cookies");
    assert!(panel["ingredients"].as_str().unwrap().starts_with("enriched flour"));
    assert!(panel.get("portionOptions").is_none());

    let calories = row(&panel, "Calories");
    assert!(close(&calories["amount"], 250.0));
    assert!(close(&calories["percentDailyValue"], 12.5));
    assert_eq!(row(&panel, "Sugars")["formattedAmount"], "12g");
    assert_eq!(row(&panel, "Saturated Fat")["formattedAmount"], "5mg");
    assert_eq!(row(&panel, "Fat")["unit"], "mg");
    assert_eq!(row(&panel, "Fat")["formattedAmount"], "11mg");
}

#[tokio::test]
async fn test_branded_ignores_portion_selection() {
    let response = AxumTestRequest::get(&format!(
        "/api/foods/{}?portion=55",
        MockUsdaClient::CHOCOLATE_CHIP_COOKIES
    ))
    .send(mock_router())
    .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_experimental_detail_has_message_and_no_rows() {
    let response = AxumTestRequest::get(&format!(
        "/api/foods/{}",
        MockUsdaClient::EXPERIMENTAL_BEEF
    ))
    .send(mock_router())
    .await;

    assert_eq!(response.status(), 200);
    let panel: Value = response.json();
    assert_eq!(panel["kind"], "experimental");
    assert_eq!(
        panel["message"],
        "Food type is experimental. No nutritional information is available."
    );
    assert!(panel.get("rows").is_none());
}

// ============================================================================
// Detail: failures
// ============================================================================

#[tokio::test]
async fn test_unknown_food_is_not_found() {
    let response = AxumTestRequest::get("/api/foods/42").send(mock_router()).await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["error"]["message"], "We could not find your food item.");
    assert_eq!(body["error"]["resource_id"], "42");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let response = AxumTestRequest::get("/api/foods/apple").send(mock_router()).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_missing_portions_is_upstream_data_incomplete() {
    let response = AxumTestRequest::get(&format!(
        "/api/foods/{}",
        MockUsdaClient::INCOMPLETE_SURVEY
    ))
    .send(mock_router())
    .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UPSTREAM_DATA_INCOMPLETE");
}

#[tokio::test]
async fn test_unrecognized_shape_is_bad_gateway() {
    let mock = MockUsdaClient::new().with_record(
        7,
        json!({ "fdcId": 7, "dataType": "Branded", "description": "NO LABEL" }),
    );
    let response = AxumTestRequest::get("/api/foods/7")
        .send(build_router(mock_resources(mock)))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UPSTREAM_SHAPE_UNRECOGNIZED");
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_returns_options_in_order() {
    let response = AxumTestRequest::get("/api/foods/search?query=apples")
        .send(mock_router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["query"], "apples");
    assert_eq!(body["options"][0]["value"], MockUsdaClient::APPLE);
    assert!(body["options"][0]["label"]
        .as_str()
        .unwrap()
        .starts_with("Apples, raw, with skin"));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_search_without_matches_carries_message() {
    let response = AxumTestRequest::get("/api/foods/search?query=durian")
        .send(mock_router())
        .await;

    let body: Value = response.json();
    assert_eq!(body["options"], json!([]));
    assert_eq!(body["message"], "No matching food items.");
}

#[tokio::test]
async fn test_blank_search_performs_no_lookup() {
    let response = AxumTestRequest::get("/api/foods/search?query=%20%20")
        .send(mock_router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["options"], json!([]));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_search_rejects_single_slash() {
    let response = AxumTestRequest::get("/api/foods/search?query=%2F")
        .send(mock_router())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_search_rejects_oversized_page() {
    let response = AxumTestRequest::get("/api/foods/search?query=milk&page_size=500")
        .send(mock_router())
        .await;

    assert_eq!(response.status(), 400);
}
