//! Search alert binding. Alerts hold the same criteria as the listing
//! filter and belong to the user that created them.

use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Patchable, RequiredFields, Resource, assign, nullable};
use crate::auth::{AccessPolicy, Session};
use crate::config::AppConfig;
use crate::models::search_alert::{ActiveModel, Column, Entity, Model};

pub struct SearchAlerts;

/// Body of `POST /search-alerts`
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSearchAlert {
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: Option<String>,
    pub neighborhood: Option<String>,
    /// Minimum bedroom count
    pub bedrooms: Option<i32>,
    /// Minimum bathroom count
    pub bathrooms: Option<f64>,
}

/// Body of `PATCH /search-alerts/{id}`; `null` removes a criterion.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchSearchAlert {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub min_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub max_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub property_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub neighborhood: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<i32>)]
    pub bedrooms: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub bathrooms: Option<Option<f64>>,
}

impl Resource for SearchAlerts {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Create = CreateSearchAlert;

    const LABEL: &'static str = "Search alert";
    const LOG_TAG: &'static str = "SEARCH_ALERT";

    fn policy(_config: &AppConfig) -> AccessPolicy {
        AccessPolicy::OWNED
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

    fn owner_column() -> Option<Column> {
        Some(Column::UserId)
    }

    fn owner_of(model: &Model) -> Option<&str> {
        Some(&model.user_id)
    }

    fn missing_fields(body: &CreateSearchAlert) -> Vec<&'static str> {
        RequiredFields::new().text("name", &body.name).finish()
    }

    fn new_row(body: CreateSearchAlert, session: Option<&Session>) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(session.map(|session| session.user_id.clone()).unwrap_or_default()),
            name: Set(body.name.unwrap_or_default()),
            min_price: Set(body.min_price),
            max_price: Set(body.max_price),
            property_type: Set(body.property_type),
            neighborhood: Set(body.neighborhood),
            bedrooms: Set(body.bedrooms),
            bathrooms: Set(body.bathrooms),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

impl Patchable for SearchAlerts {
    type Patch = PatchSearchAlert;

    fn blank_fields(patch: &PatchSearchAlert) -> Vec<&'static str> {
        RequiredFields::new()
            .text_if_present("name", &patch.name)
            .finish()
    }

    // The owner is fixed at creation and has no patch field.
    fn apply_patch(row: &mut ActiveModel, patch: PatchSearchAlert) {
        assign(&mut row.name, patch.name);
        assign(&mut row.min_price, patch.min_price);
        assign(&mut row.max_price, patch.max_price);
        assign(&mut row.property_type, patch.property_type);
        assign(&mut row.neighborhood, patch.neighborhood);
        assign(&mut row.bedrooms, patch.bedrooms);
        assign(&mut row.bathrooms, patch.bathrooms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveValue, IntoActiveModel};

    #[test]
    fn patch_ignores_user_id() {
        let alert = Model {
            id: Uuid::new_v4(),
            user_id: "owner".to_string(),
            name: "Fan".to_string(),
            min_price: Some(100_000.0),
            max_price: None,
            property_type: None,
            neighborhood: Some("The Fan".to_string()),
            bedrooms: None,
            bathrooms: None,
            created_at: chrono::Utc::now().into(),
        };
        let mut row = alert.into_active_model();

        let patch: PatchSearchAlert = serde_json::from_value(serde_json::json!({
            "userId": "intruder",
            "minPrice": null,
            "bedrooms": 3
        }))
        .unwrap();
        SearchAlerts::apply_patch(&mut row, patch);

        assert!(matches!(row.user_id, ActiveValue::Unchanged(ref id) if id == "owner"));
        assert_eq!(row.min_price, ActiveValue::Set(None));
        assert_eq!(row.bedrooms, ActiveValue::Set(Some(3)));
        assert!(matches!(row.neighborhood, ActiveValue::Unchanged(_)));
    }
}
