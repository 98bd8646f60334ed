//! # Saved Property Handlers

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

use super::{Stored, path_id, stored};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::models::saved_property::Model as SavedProperty;
use crate::resources::{
    ResourceService, SavedProperties,
    saved_properties::{SaveProperty, SavedPropertyWithListing, with_listings},
};
use crate::server::AppState;

/// The caller's saved properties with their listings, newest first
#[utoipa::path(
    get,
    path = "/saved-properties",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved properties", body = [SavedPropertyWithListing]),
        (status = 401, description = "Session required", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "saved-properties"
)]
pub async fn list_saved_properties(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<SavedPropertyWithListing>>, ApiError> {
    let saved = ResourceService::<SavedProperties>::new(&state.db, &state.config)
        .list(&caller, Condition::all())
        .await?;

    Ok(Json(with_listings(&state.db, saved).await?))
}

#[utoipa::path(
    post,
    path = "/saved-properties",
    security(("bearer_auth" = [])),
    request_body = SaveProperty,
    responses(
        (status = 201, description = "Property saved", body = SavedProperty),
        (status = 400, description = "propertyId missing", body = ApiError),
        (status = 401, description = "Session required", body = ApiError),
        (status = 404, description = "Property does not exist", body = ApiError),
        (status = 409, description = "Property already saved", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "saved-properties"
)]
pub async fn save_property(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<SaveProperty>, JsonRejection>,
) -> Result<Stored<SavedProperty>, ApiError> {
    let Json(body) = body?;

    let saved = ResourceService::<SavedProperties>::new(&state.db, &state.config)
        .create(&caller, body)
        .await?;

    Ok(stored(saved))
}

#[utoipa::path(
    delete,
    path = "/saved-properties/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Saved property id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Saved by another user", body = ApiError),
        (status = 404, description = "No such saved property", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "saved-properties"
)]
pub async fn delete_saved_property(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;

    ResourceService::<SavedProperties>::new(&state.db, &state.config)
        .delete(&caller, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
