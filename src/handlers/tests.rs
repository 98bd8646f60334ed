//! # Tests for Handlers

use axum::{
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Json},
};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::handlers::{created, healthz, root, stored, tools};
use crate::server::AppState;

fn state(db: DatabaseConnection) -> State<AppState> {
    State(AppState::new(AppConfig::default(), db))
}

#[tokio::test]
async fn test_root_handler_returns_expected_service_info() {
    let Json(service_info) = root().await;

    assert_eq!(service_info.service, "brokerage-listings");
    assert_eq!(service_info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_root_handler_returns_valid_json() {
    let Json(service_info) = root().await;
    let json = serde_json::to_value(&service_info).unwrap();

    assert!(json.get("service").is_some());
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_healthz_reports_reachable_database() {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let Json(health) = healthz(state(db)).await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.database, "ok");
}

#[tokio::test]
async fn test_healthz_without_connection_is_unavailable() {
    let error = healthz(state(DatabaseConnection::default()))
        .await
        .unwrap_err();

    assert_eq!(error.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_catalog_lists_richmond_neighborhoods() {
    let Json(catalog) = tools::catalog().await;

    assert!(catalog.neighborhoods.iter().any(|n| n == "Church Hill"));
    assert!(catalog.property_types.iter().any(|t| t == "Single-Family Home"));
    assert!(!catalog.distressed_types.is_empty());
}

#[test]
fn test_created_sets_location() {
    let id = Uuid::new_v4();
    let response = created("/leads", id, ()).into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        format!("/leads/{id}").as_str()
    );
}

#[test]
fn test_stored_has_no_location() {
    let response = stored(()).into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().get(LOCATION).is_none());
}
