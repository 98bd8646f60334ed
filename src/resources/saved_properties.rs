//! Saved property binding. Rows belong to the user that saved them.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{RequiredFields, Resource, properties};
use crate::auth::{AccessPolicy, Session};
use crate::config::AppConfig;
use crate::error::{ApiError, store_error};
use crate::models::{
    Property, property,
    saved_property::{ActiveModel, Column, Entity, Model},
};

pub struct SavedProperties;

/// Body of `POST /saved-properties`
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProperty {
    pub property_id: Option<Uuid>,
}

/// A saved property with the listing it points at
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedPropertyWithListing {
    pub id: Uuid,
    pub user_id: String,
    pub property_id: Uuid,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: sea_orm::prelude::DateTimeWithTimeZone,
    /// `null` only if the listing disappeared between queries
    pub property: Option<property::Model>,
}

#[async_trait]
impl Resource for SavedProperties {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Create = SaveProperty;

    const LABEL: &'static str = "Saved property";
    const LOG_TAG: &'static str = "SAVED_PROPERTY";

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

    fn missing_fields(body: &SaveProperty) -> Vec<&'static str> {
        RequiredFields::new()
            .value("propertyId", &body.property_id)
            .finish()
    }

    async fn check_references(db: &DatabaseConnection, body: &SaveProperty) -> Result<(), ApiError> {
        match body.property_id {
            Some(property_id) => {
                properties::ensure_exists(db, property_id, "SAVED_PROPERTY_CREATE_ERROR").await
            }
            None => Ok(()),
        }
    }

    fn new_row(body: SaveProperty, session: Option<&Session>) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(session.map(|session| session.user_id.clone()).unwrap_or_default()),
            property_id: Set(body.property_id.unwrap_or_default()),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Attach the referenced listings to saved rows with a single lookup.
pub async fn with_listings(
    db: &DatabaseConnection,
    saved: Vec<Model>,
) -> Result<Vec<SavedPropertyWithListing>, ApiError> {
    if saved.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = saved.iter().map(|row| row.property_id).collect();
    let mut listings: HashMap<Uuid, property::Model> = Property::find()
        .filter(property::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|err| store_error("SAVED_PROPERTY_LIST_ERROR", err))?
        .into_iter()
        .map(|listing| (listing.id, listing))
        .collect();

    Ok(saved
        .into_iter()
        .map(|row| SavedPropertyWithListing {
            property: listings.remove(&row.property_id),
            id: row.id,
            user_id: row.user_id,
            property_id: row.property_id,
            created_at: row.created_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    #[test]
    fn property_id_is_required() {
        assert_eq!(
            SavedProperties::missing_fields(&SaveProperty::default()),
            vec!["propertyId"]
        );
    }

    #[test]
    fn row_is_owned_by_the_caller() {
        let session = Session {
            user_id: "user-3".to_string(),
            role: Role::User,
        };
        let property_id = Uuid::new_v4();

        let row = SavedProperties::new_row(
            SaveProperty {
                property_id: Some(property_id),
            },
            Some(&session),
        );

        assert_eq!(row.user_id, Set("user-3".to_string()));
        assert_eq!(row.property_id, Set(property_id));
    }
}
