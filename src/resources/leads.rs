//! Lead capture binding.
//!
//! Anyone may submit a lead; only admins can list them. Leads are never
//! updated or deleted through the API.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{RequiredFields, Resource, properties};
use crate::auth::{Access, AccessPolicy, Session};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::lead::{ActiveModel, Column, Entity, Model};

pub struct Leads;

/// Body of `POST /leads`
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub property_id: Option<Uuid>,
    /// Page or form the lead was submitted from
    pub source: Option<String>,
}

#[async_trait]
impl Resource for Leads {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Create = CreateLead;

    const LABEL: &'static str = "Lead";
    const LOG_TAG: &'static str = "LEAD";

    fn policy(_config: &AppConfig) -> AccessPolicy {
        AccessPolicy {
            read: Access::Admin,
            write: Access::Anyone,
        }
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

    fn missing_fields(body: &CreateLead) -> Vec<&'static str> {
        RequiredFields::new()
            .text("name", &body.name)
            .text("email", &body.email)
            .finish()
    }

    async fn check_references(db: &DatabaseConnection, body: &CreateLead) -> Result<(), ApiError> {
        match body.property_id {
            Some(property_id) => properties::ensure_exists(db, property_id, "LEAD_CREATE_ERROR").await,
            None => Ok(()),
        }
    }

    fn new_row(body: CreateLead, session: Option<&Session>) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(body.name.unwrap_or_default().trim().to_string()),
            email: Set(body.email.unwrap_or_default().trim().to_string()),
            phone: Set(body.phone),
            message: Set(body.message),
            property_id: Set(body.property_id),
            source: Set(body.source),
            user_id: Set(session.map(|session| session.user_id.clone())),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
