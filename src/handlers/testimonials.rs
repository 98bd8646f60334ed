//! # Testimonial Handlers

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use sea_orm::Condition;

use super::{Stored, stored};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::models::testimonial::Model as Testimonial;
use crate::resources::{ResourceService, Testimonials, testimonials::CreateTestimonial};
use crate::server::AppState;

#[utoipa::path(
    get,
    path = "/testimonials",
    responses(
        (status = 200, description = "Testimonials, newest first", body = [Testimonial]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "testimonials"
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let testimonials = ResourceService::<Testimonials>::new(&state.db, &state.config)
        .list(&caller, Condition::all())
        .await?;

    Ok(Json(testimonials))
}

#[utoipa::path(
    post,
    path = "/testimonials",
    security((), ("bearer_auth" = [])),
    request_body = CreateTestimonial,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 400, description = "Missing required fields", body = ApiError),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "testimonials"
)]
pub async fn create_testimonial(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<CreateTestimonial>, JsonRejection>,
) -> Result<Stored<Testimonial>, ApiError> {
    let Json(body) = body?;

    let testimonial = ResourceService::<Testimonials>::new(&state.db, &state.config)
        .create(&caller, body)
        .await?;

    Ok(stored(testimonial))
}
