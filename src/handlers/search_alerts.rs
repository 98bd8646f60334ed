//! # Search Alert Handlers

use axum::{
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Json,
};
use sea_orm::Condition;
use uuid::Uuid;

use super::{Created, created, path_id};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::filter::PropertyCriteria;
use crate::models::{property::Model as Property, search_alert::Model as SearchAlert};
use crate::resources::{
    Properties, ResourceService, SearchAlerts,
    search_alerts::{CreateSearchAlert, PatchSearchAlert},
};
use crate::server::AppState;

#[utoipa::path(
    get,
    path = "/search-alerts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's search alerts", body = [SearchAlert]),
        (status = 401, description = "Session required", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "search-alerts"
)]
pub async fn list_search_alerts(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<SearchAlert>>, ApiError> {
    let alerts = ResourceService::<SearchAlerts>::new(&state.db, &state.config)
        .list(&caller, Condition::all())
        .await?;

    Ok(Json(alerts))
}

#[utoipa::path(
    post,
    path = "/search-alerts",
    security(("bearer_auth" = [])),
    request_body = CreateSearchAlert,
    responses(
        (status = 201, description = "Alert created", body = SearchAlert, headers(
            ("Location", description = "URL of the created alert")
        )),
        (status = 400, description = "Name missing", body = ApiError),
        (status = 401, description = "Session required", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "search-alerts"
)]
pub async fn create_search_alert(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<CreateSearchAlert>, JsonRejection>,
) -> Result<Created<SearchAlert>, ApiError> {
    let Json(body) = body?;

    let alert = ResourceService::<SearchAlerts>::new(&state.db, &state.config)
        .create(&caller, body)
        .await?;

    Ok(created("/search-alerts", alert.id, alert))
}

#[utoipa::path(
    get,
    path = "/search-alerts/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Search alert id")),
    responses(
        (status = 200, description = "Search alert", body = SearchAlert),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Owned by another user", body = ApiError),
        (status = 404, description = "No such alert", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "search-alerts"
)]
pub async fn get_search_alert(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SearchAlert>, ApiError> {
    let id = path_id(path)?;

    let alert = ResourceService::<SearchAlerts>::new(&state.db, &state.config)
        .get(&caller, id)
        .await?;

    Ok(Json(alert))
}

#[utoipa::path(
    patch,
    path = "/search-alerts/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Search alert id")),
    request_body = PatchSearchAlert,
    responses(
        (status = 200, description = "Updated alert", body = SearchAlert),
        (status = 400, description = "Malformed body", body = ApiError),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Owned by another user", body = ApiError),
        (status = 404, description = "No such alert", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "search-alerts"
)]
pub async fn update_search_alert(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<PatchSearchAlert>, JsonRejection>,
) -> Result<Json<SearchAlert>, ApiError> {
    let id = path_id(path)?;
    let Json(patch) = body?;

    let alert = ResourceService::<SearchAlerts>::new(&state.db, &state.config)
        .update(&caller, id, patch)
        .await?;

    Ok(Json(alert))
}

#[utoipa::path(
    delete,
    path = "/search-alerts/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Search alert id")),
    responses(
        (status = 204, description = "Alert deleted"),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Owned by another user", body = ApiError),
        (status = 404, description = "No such alert", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "search-alerts"
)]
pub async fn delete_search_alert(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;

    ResourceService::<SearchAlerts>::new(&state.db, &state.config)
        .delete(&caller, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Listings that currently match a saved alert
#[utoipa::path(
    get,
    path = "/search-alerts/{id}/properties",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Search alert id")),
    responses(
        (status = 200, description = "Matching listings, newest first", body = [Property]),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Owned by another user", body = ApiError),
        (status = 404, description = "No such alert", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "search-alerts"
)]
pub async fn matching_properties(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let id = path_id(path)?;

    let alert = ResourceService::<SearchAlerts>::new(&state.db, &state.config)
        .get(&caller, id)
        .await?;

    let criteria = PropertyCriteria::from(&alert);
    let listings = ResourceService::<Properties>::new(&state.db, &state.config)
        .list(&caller, criteria.condition())
        .await?;

    Ok(Json(listings))
}
