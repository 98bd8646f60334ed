//! Test utilities for exercising the API against an in-memory database.
//!
//! Every test gets its own SQLite database with all migrations applied and a
//! router built exactly as the server builds it.

#![allow(dead_code)]

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use brokerage::{
    config::AppConfig,
    server::{AppState, create_app},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-session-secret-0123456789";

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Test profile configuration with a session secret configured.
pub fn test_config() -> AppConfig {
    AppConfig {
        profile: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        session_secret: Some(SECRET.to_string()),
        ..Default::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Result<Self> {
        let db = setup_test_db().await?;
        let router = create_app(AppState::new(config, db.clone()));
        Ok(Self { router, db })
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Response<()>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, Response::from_parts(parts, ()), json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self.send("GET", uri, token, None).await;
        (status, body)
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self.send("POST", uri, token, Some(body)).await;
        (status, body)
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self.send("PATCH", uri, token, Some(body)).await;
        (status, body)
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self.send("DELETE", uri, token, None).await;
        (status, body)
    }

    /// Create a listing through the API and return its id.
    pub async fn create_property(&self, overrides: Value) -> String {
        let mut body = property_body();
        if let (Some(target), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
            for (key, value) in extra {
                target.insert(key.clone(), value.clone());
            }
        }

        let (status, created) = self.post("/properties", None, body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
        created["id"].as_str().unwrap().to_string()
    }
}

/// A complete listing body with every required field.
pub fn property_body() -> Value {
    json!({
        "title": "Renovated Fan District Rowhouse",
        "description": "Three-story brick rowhouse with original heart pine floors.",
        "price": 450000,
        "address": "2100 Park Ave",
        "city": "Richmond",
        "state": "VA",
        "zipCode": "23220",
        "neighborhood": "The Fan",
        "bedrooms": 3,
        "bathrooms": 2.5,
        "squareFeet": 2100,
        "propertyType": "Townhouse",
        "features": ["Hardwood Floors", "Fireplace"],
        "images": []
    })
}

/// Mint an HS256 session token accepted by the test configuration.
pub fn mint_token(sub: &str, role: Option<&str>) -> String {
    let claims = json!({
        "sub": sub,
        "role": role,
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn user_token(sub: &str) -> String {
    mint_token(sub, Some("user"))
}

pub fn admin_token() -> String {
    mint_token("admin-1", Some("admin"))
}
