//! # Property Handlers

use axum::{
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::{Created, created, path_id};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::filter::{PropertyCriteria, PropertyFilter};
use crate::models::property::Model as Property;
use crate::resources::{
    Properties, ResourceService,
    properties::{CreateProperty, PatchProperty},
};
use crate::server::AppState;

/// List properties matching the optional filters, newest first
#[utoipa::path(
    get,
    path = "/properties",
    params(PropertyFilter),
    responses(
        (status = 200, description = "Matching listings", body = [Property]),
        (status = 400, description = "Malformed query string", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let Query(pairs) = query?;
    let filter: PropertyFilter = pairs.into_iter().collect();
    let criteria = PropertyCriteria::from(&filter);
    tracing::debug!(?criteria, "listing properties");

    let listings = ResourceService::<Properties>::new(&state.db, &state.config)
        .list(&caller, criteria.condition())
        .await?;

    Ok(Json(listings))
}

#[utoipa::path(
    post,
    path = "/properties",
    security((), ("bearer_auth" = [])),
    request_body = CreateProperty,
    responses(
        (status = 201, description = "Listing created", body = Property, headers(
            ("Location", description = "URL of the created listing")
        )),
        (status = 400, description = "Missing required fields", body = ApiError),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<CreateProperty>, JsonRejection>,
) -> Result<Created<Property>, ApiError> {
    let Json(body) = body?;

    let listing = ResourceService::<Properties>::new(&state.db, &state.config)
        .create(&caller, body)
        .await?;

    Ok(created("/properties", listing.id, listing))
}

#[utoipa::path(
    get,
    path = "/properties/{id}",
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Listing", body = Property),
        (status = 404, description = "No such listing", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Property>, ApiError> {
    let id = path_id(path)?;

    let listing = ResourceService::<Properties>::new(&state.db, &state.config)
        .get(&caller, id)
        .await?;

    Ok(Json(listing))
}

#[utoipa::path(
    patch,
    path = "/properties/{id}",
    security((), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property id")),
    request_body = PatchProperty,
    responses(
        (status = 200, description = "Updated listing", body = Property),
        (status = 400, description = "Malformed body", body = ApiError),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "No such listing", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<PatchProperty>, JsonRejection>,
) -> Result<Json<Property>, ApiError> {
    let id = path_id(path)?;
    let Json(patch) = body?;

    let listing = ResourceService::<Properties>::new(&state.db, &state.config)
        .update(&caller, id, patch)
        .await?;

    Ok(Json(listing))
}

#[utoipa::path(
    delete,
    path = "/properties/{id}",
    security((), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 404, description = "No such listing", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;

    ResourceService::<Properties>::new(&state.db, &state.config)
        .delete(&caller, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
