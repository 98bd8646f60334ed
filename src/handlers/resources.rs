//! # Educational Resource Handlers

use axum::{
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::Json,
};
use sea_orm::Condition;
use uuid::Uuid;

use super::{Created, created, path_id};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::models::resource::Model as Resource;
use crate::resources::{ResourceService, Resources, learning::CreateResource};
use crate::server::AppState;

#[utoipa::path(
    get,
    path = "/resources",
    responses(
        (status = 200, description = "Guides and downloads, newest first", body = [Resource]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "resources"
)]
pub async fn list_resources(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let resources = ResourceService::<Resources>::new(&state.db, &state.config)
        .list(&caller, Condition::all())
        .await?;

    Ok(Json(resources))
}

#[utoipa::path(
    post,
    path = "/resources",
    security((), ("bearer_auth" = [])),
    request_body = CreateResource,
    responses(
        (status = 201, description = "Resource created", body = Resource, headers(
            ("Location", description = "URL of the created resource")
        )),
        (status = 400, description = "Missing required fields", body = ApiError),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "resources"
)]
pub async fn create_resource(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<CreateResource>, JsonRejection>,
) -> Result<Created<Resource>, ApiError> {
    let Json(body) = body?;

    let resource = ResourceService::<Resources>::new(&state.db, &state.config)
        .create(&caller, body)
        .await?;

    Ok(created("/resources", resource.id, resource))
}

#[utoipa::path(
    get,
    path = "/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource id")),
    responses(
        (status = 200, description = "Resource", body = Resource),
        (status = 404, description = "No such resource", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "resources"
)]
pub async fn get_resource(
    State(state): State<AppState>,
    caller: Caller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Resource>, ApiError> {
    let id = path_id(path)?;

    let resource = ResourceService::<Resources>::new(&state.db, &state.config)
        .get(&caller, id)
        .await?;

    Ok(Json(resource))
}
