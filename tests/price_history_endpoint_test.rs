use axum::http::StatusCode;
use propval::api;
use propval::config::Config;
use propval::db::init_db;
use propval::engine::default_utc_offset;
use propval::render::Locale;
use propval::{RecordingNotifier, Repository, ValuationEngine};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

async fn setup_test_app() -> (axum::Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));

    let config = Config {
        port: 0,
        database_path: db_path,
        market_tables_path: None,
        narrative_locale: Locale::Ru,
        notify_webhook_url: None,
        app_utc_offset: default_utc_offset(),
    };
    let state = api::AppState::new(
        repo,
        ValuationEngine::default(),
        Arc::new(RecordingNotifier::new()),
        config,
    );

    (api::create_router(state), temp_dir)
}

async fn send(app: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_equal_prices_rejected() {
    let (app, _temp) = setup_test_app().await;

    let (status, body) = send(
        app.clone(),
        "POST",
        "/v1/properties/1/price-changes",
        Some(json!({"oldPrice": 10_000_000, "newPrice": 10_000_000})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "newPrice");

    let (status, body) = send(app, "GET", "/v1/properties/1/price-history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_positive_price_rejected() {
    let (app, _temp) = setup_test_app().await;

    let (status, _) = send(
        app,
        "POST",
        "/v1/properties/1/price-changes",
        Some(json!({"newPrice": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_price_changes_chain_and_summarize() {
    let (app, _temp) = setup_test_app().await;

    let (status, first) = send(
        app.clone(),
        "POST",
        "/v1/properties/7/price-changes",
        Some(json!({
            "newPrice": 10_000_000,
            "reason": "listing",
            "effectiveDate": "2024-01-10T12:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["changeType"], "increase");
    assert!(first["oldPrice"].is_null());
    assert_eq!(first["autoGenerated"], true);

    let (status, second) = send(
        app.clone(),
        "POST",
        "/v1/properties/7/price-changes",
        Some(json!({
            "newPrice": 9_000_000,
            "changedBy": "agent-42",
            "effectiveDate": "2024-02-01T09:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["oldPrice"].as_f64(), Some(10_000_000.0));
    assert_eq!(second["delta"].as_f64(), Some(-1_000_000.0));
    assert_eq!(second["deltaPercent"].as_f64(), Some(-10.0));
    assert_eq!(second["changeType"], "decrease");
    assert_eq!(second["autoGenerated"], false);

    let (status, history) = send(app.clone(), "GET", "/v1/properties/7/price-history", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = history["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["newPrice"].as_f64(), Some(9_000_000.0));
    assert_eq!(history["summary"]["changeCount"], 2);
    assert_eq!(history["summary"]["averageChange"].as_f64(), Some(-500_000.0));

    let (status, at) = send(
        app.clone(),
        "GET",
        "/v1/properties/7/price-at?date=2024-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at["price"].as_f64(), Some(10_000_000.0));

    let (_, at) = send(
        app.clone(),
        "GET",
        "/v1/properties/7/price-at?date=2024-02-01",
        None,
    )
    .await;
    assert_eq!(at["price"].as_f64(), Some(9_000_000.0));

    let (status, _) = send(app, "GET", "/v1/properties/7/price-at?date=2023-12-31", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_is_per_property() {
    let (app, _temp) = setup_test_app().await;

    send(
        app.clone(),
        "POST",
        "/v1/properties/1/price-changes",
        Some(json!({"newPrice": 5_000_000})),
    )
    .await;

    let (status, body) = send(app, "GET", "/v1/properties/2/price-history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["entries"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"]["changeCount"], 0);
}
