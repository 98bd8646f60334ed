//! # Lead Handlers

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use metrics::counter;
use sea_orm::Condition;

use super::{Stored, stored};
use crate::auth::Caller;
use crate::error::ApiError;
use crate::models::lead::Model as Lead;
use crate::resources::{Leads, ResourceService, leads::CreateLead};
use crate::server::AppState;

/// Lead forms on the site; any other submitted source is counted as `other`.
const KNOWN_SOURCES: [&str; 4] = ["website", "homepage-cta", "properties-page", "property-detail"];

fn metric_source(source: Option<&str>) -> &'static str {
    match source.map(str::trim) {
        None | Some("") => "unknown",
        Some(source) => KNOWN_SOURCES
            .iter()
            .find(|known| **known == source)
            .copied()
            .unwrap_or("other"),
    }
}

/// List captured leads, newest first (admin only)
#[utoipa::path(
    get,
    path = "/leads",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All leads", body = [Lead]),
        (status = 401, description = "Session required", body = ApiError),
        (status = 403, description = "Admin role required", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "leads"
)]
pub async fn list_leads(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Lead>>, ApiError> {
    let leads = ResourceService::<Leads>::new(&state.db, &state.config)
        .list(&caller, Condition::all())
        .await?;

    Ok(Json(leads))
}

/// Submit a contact or interest form
#[utoipa::path(
    post,
    path = "/leads",
    security((), ("bearer_auth" = [])),
    request_body = CreateLead,
    responses(
        (status = 201, description = "Lead captured", body = Lead),
        (status = 400, description = "Name or email missing", body = ApiError),
        (status = 404, description = "Referenced property does not exist", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "leads"
)]
pub async fn create_lead(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<CreateLead>, JsonRejection>,
) -> Result<Stored<Lead>, ApiError> {
    let Json(body) = body?;

    let lead = ResourceService::<Leads>::new(&state.db, &state.config)
        .create(&caller, body)
        .await?;

    counter!("leads_captured_total", "source" => metric_source(lead.source.as_deref())).increment(1);

    Ok(stored(lead))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_source_is_bounded() {
        assert_eq!(metric_source(Some("homepage-cta")), "homepage-cta");
        assert_eq!(metric_source(Some(" website ")), "website");
        assert_eq!(metric_source(Some("utm_campaign=spring-2026")), "other");
        assert_eq!(metric_source(Some("")), "unknown");
        assert_eq!(metric_source(None), "unknown");
    }
}
