//! Educational resource binding (guides, checklists, downloads).

use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{RequiredFields, Resource};
use crate::auth::{AccessPolicy, Session};
use crate::config::AppConfig;
use crate::models::resource::{ActiveModel, Column, Entity, Model};

pub struct Resources;

/// Body of `POST /resources`
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResource {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub download_url: Option<String>,
}

impl Resource for Resources {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Create = CreateResource;

    const LABEL: &'static str = "Resource";
    const LOG_TAG: &'static str = "RESOURCE";

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

    fn missing_fields(body: &CreateResource) -> Vec<&'static str> {
        RequiredFields::new()
            .text("title", &body.title)
            .text("description", &body.description)
            .text("category", &body.category)
            .finish()
    }

    fn new_row(body: CreateResource, _session: Option<&Session>) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(body.title.unwrap_or_default()),
            description: Set(body.description.unwrap_or_default()),
            category: Set(body.category.unwrap_or_default()),
            content: Set(body.content),
            image: Set(body.image),
            download_url: Set(body.download_url),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
