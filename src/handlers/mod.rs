//! # API Handlers
//!
//! HTTP endpoint handlers for the listings API. Handlers translate requests
//! into [`ResourceService`](crate::resources::ResourceService) calls; all access
//! decisions happen there.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderName, StatusCode, header::LOCATION},
    response::Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod leads;
pub mod properties;
pub mod resources;
pub mod saved_properties;
pub mod search_alerts;
pub mod testimonials;
pub mod tools;

/// `201 Created` with a `Location` header pointing at the new row
pub type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

pub(crate) fn created<T>(collection: &str, id: Uuid, body: T) -> Created<T> {
    (
        StatusCode::CREATED,
        [(LOCATION, format!("{collection}/{id}"))],
        Json(body),
    )
}

/// `201 Created` for rows that have no read-by-id route
pub type Stored<T> = (StatusCode, Json<T>);

pub(crate) fn stored<T>(body: T) -> Stored<T> {
    (StatusCode::CREATED, Json(body))
}

/// Turn a path rejection into the API's problem response.
pub(crate) fn path_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    let Path(id) = path?;
    Ok(id)
}

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness and database reachability
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service and database are healthy", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = ApiError)
    ),
    tag = "root"
)]
pub async fn healthz(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    db::health_check(&state.db).await.map_err(|err| {
        tracing::error!(error = %err, "health check failed");
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database unreachable",
        )
    })?;

    Ok(Json(HealthStatus {
        status: "ok".to_string(),
        database: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests;
