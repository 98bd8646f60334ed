//! Testimonial binding.

use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{RequiredFields, Resource};
use crate::auth::{AccessPolicy, Session};
use crate::config::AppConfig;
use crate::models::testimonial::{ActiveModel, Column, Entity, Model};

pub struct Testimonials;

/// Body of `POST /testimonials`
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonial {
    pub name: Option<String>,
    pub role: Option<String>,
    pub content: Option<String>,
    pub rating: Option<i32>,
    pub image: Option<String>,
}

impl Resource for Testimonials {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Create = CreateTestimonial;

    const LABEL: &'static str = "Testimonial";
    const LOG_TAG: &'static str = "TESTIMONIAL";

    fn policy(config: &AppConfig) -> AccessPolicy {
        AccessPolicy::catalog(config)
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn id_of(model: &Model) -> Uuid {
        model.id
    }

    fn missing_fields(body: &CreateTestimonial) -> Vec<&'static str> {
        RequiredFields::new()
            .text("name", &body.name)
            .text("content", &body.content)
            .value("rating", &body.rating)
            .finish()
    }

    fn new_row(body: CreateTestimonial, _session: Option<&Session>) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(body.name.unwrap_or_default()),
            role: Set(body.role),
            content: Set(body.content.unwrap_or_default()),
            rating: Set(body.rating.unwrap_or_default()),
            image: Set(body.image),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
