//! Integration tests for the reading endpoints, run over an in-memory store.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, body_text, delete, get, post_json};
use glucolog_core::reading::Reading;
use glucolog_core::store::{MemoryReadingStore, ReadingStore, StoreError};
use serde_json::json;

const ANA: &str = "ana@example.com";
const DAN: &str = "dan@example.com";

async fn record(app: &axum::Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/v1/readings", Some(token), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Test: recording classifies and reports the recent average
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_reading_returns_201_with_classification() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    let data = record(
        &app,
        &token,
        json!({
            "value": 110,
            "context": "fasting",
            "date": "2025-03-14",
            "time": "07:30",
            "note": "  after walk  "
        }),
    )
    .await;

    let reading = &data["reading"];
    assert_eq!(reading["date"], "2025-03-14");
    assert_eq!(reading["time"], "07:30");
    assert_eq!(reading["value"], 110);
    assert_eq!(reading["context"], "fasting");
    assert_eq!(reading["tone"], "warning");
    assert_eq!(reading["note"], "after walk");
    assert!(reading["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert_eq!(data["recent_average"], 110.0);
}

#[tokio::test]
async fn recent_average_covers_the_last_five_readings() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    let mut last = json!(null);
    for value in [300, 100, 100, 100, 100, 100] {
        last = record(&app, &token, json!({ "value": value, "context": "random" })).await;
    }

    assert_eq!(last["recent_average"], 100.0);
}

#[tokio::test]
async fn date_and_time_default_to_now() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    let data = record(&app, &token, json!({ "value": 95, "context": "post_meal" })).await;

    let reading = &data["reading"];
    assert_eq!(reading["date"].as_str().unwrap().len(), 10);
    assert_eq!(reading["time"].as_str().unwrap().len(), 5);
    assert_eq!(reading["note"], serde_json::Value::Null);
}

// ---------------------------------------------------------------------------
// Test: a failed re-read after saving does not fail the request
// ---------------------------------------------------------------------------

/// Accepts writes but cannot read them back.
#[derive(Default)]
struct WriteOnlyStore {
    inner: MemoryReadingStore,
}

#[async_trait]
impl ReadingStore for WriteOnlyStore {
    async fn append(&self, owner: &str, reading: Reading) -> Result<Reading, StoreError> {
        self.inner.append(owner, reading).await
    }

    async fn list_all(&self, _owner: &str) -> Result<Vec<Reading>, StoreError> {
        Err(StoreError::Unavailable("read replica down".into()))
    }

    async fn clear(&self, owner: &str) -> Result<u64, StoreError> {
        self.inner.clear(owner).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn saved_reading_is_reported_even_if_average_cannot_be_read() {
    let store = Arc::new(WriteOnlyStore::default());
    let app = common::build_app(store.clone(), None);
    let token = common::token_for(ANA);

    let response = post_json(
        app,
        "/api/v1/readings",
        Some(&token),
        json!({ "value": 95, "context": "fasting" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["reading"]["value"], 95);
    assert_eq!(data["recent_average"], serde_json::Value::Null);

    // Exactly one copy was written.
    assert_eq!(store.inner.list_all(ANA).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_range_value_returns_400() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    for value in [19, 601] {
        let response = post_json(
            app.clone(),
            "/api/v1/readings",
            Some(&token),
            json!({ "value": value, "context": "fasting" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn malformed_time_returns_400() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    let response = post_json(
        app,
        "/api/v1/readings",
        Some(&token),
        json!({ "value": 100, "context": "fasting", "time": "7 o'clock" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_context_is_recorded_as_random() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    let data = record(&app, &token, json!({ "value": 150, "context": "before_bed" })).await;

    assert_eq!(data["reading"]["context"], "random");
    assert_eq!(data["reading"]["tone"], "warning");
}

// ---------------------------------------------------------------------------
// Test: authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reading_endpoints_require_a_session() {
    let app = common::build_test_app();

    for uri in [
        "/api/v1/readings",
        "/api/v1/readings/summary",
        "/api/v1/readings/trends",
        "/api/v1/readings/export",
    ] {
        let response = get(app.clone(), uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let response = get(app, "/api/v1/readings", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: history, summary, trends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn history_is_newest_first() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    for value in [90, 150, 200] {
        record(&app, &token, json!({ "value": value, "context": "post_meal" })).await;
    }

    let response = get(app, "/api/v1/readings", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let values: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["value"].as_i64().unwrap())
        .collect();
    assert_eq!(values, vec![200, 150, 90]);
}

#[tokio::test]
async fn summary_is_null_without_readings() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    let response = get(app, "/api/v1/readings/summary", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], serde_json::Value::Null);
}

#[tokio::test]
async fn summary_reports_totals() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    record(&app, &token, json!({ "value": 90, "context": "fasting" })).await;
    record(&app, &token, json!({ "value": 130, "context": "fasting" })).await;

    let response = get(app, "/api/v1/readings/summary", Some(&token)).await;
    let summary = body_json(response).await["data"].clone();

    assert_eq!(summary["total"], 2);
    assert_eq!(summary["mean"], 110.0);
    assert_eq!(summary["percent_good"], 50.0);
}

#[tokio::test]
async fn trends_include_points_bands_and_context_averages() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    record(&app, &token, json!({ "value": 90, "context": "fasting", "date": "2025-03-14", "time": "07:00" })).await;
    record(&app, &token, json!({ "value": 160, "context": "post_meal", "date": "2025-03-14", "time": "14:00" })).await;

    let response = get(app, "/api/v1/readings/trends", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let trends = body_json(response).await["data"].clone();
    assert_eq!(trends["points"].as_array().unwrap().len(), 2);
    assert_eq!(trends["points"][0]["value"], 90);
    assert_eq!(trends["bands"].as_array().unwrap().len(), 3);
    assert_eq!(trends["averages_by_context"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: CSV export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_returns_csv_attachment() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    record(&app, &token, json!({ "value": 95, "context": "fasting", "date": "2025-03-14", "time": "07:30", "note": "oats, milk" })).await;

    let response = get(app, "/api/v1/readings/export", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"glicemie_"));
    assert!(disposition.ends_with(".csv\""));

    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Data,Ora,Valoare,Tip Măsurare,Feedback,Ton,Note")
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("2025-03-14,07:30,95,Pe nemâncate,"));
    assert!(row.ends_with(",good,\"oats, milk\""));
    assert_eq!(lines.next(), None);
}

// ---------------------------------------------------------------------------
// Test: clearing and owner isolation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clear_requires_confirmation() {
    let app = common::build_test_app();
    let token = common::token_for(ANA);

    record(&app, &token, json!({ "value": 95, "context": "fasting" })).await;

    let response = delete(app.clone(), "/api/v1/readings", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = get(app, "/api/v1/readings", Some(&token)).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn clear_only_touches_the_callers_log() {
    let app = common::build_test_app();
    let ana = common::token_for(ANA);
    let dan = common::token_for(DAN);

    record(&app, &ana, json!({ "value": 95, "context": "fasting" })).await;
    record(&app, &ana, json!({ "value": 105, "context": "fasting" })).await;
    record(&app, &dan, json!({ "value": 180, "context": "post_meal" })).await;

    let response = delete(app.clone(), "/api/v1/readings?confirm=true", Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted"], 2);

    let response = get(app.clone(), "/api/v1/readings", Some(&ana)).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let response = get(app, "/api/v1/readings", Some(&dan)).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}
