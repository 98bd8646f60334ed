//! Search alert entity model
//!
//! Saved listing criteria owned by a user. Delivering notifications for new
//! matches happens outside this service.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Saved search criteria
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "search_alerts")]
#[serde(rename_all = "camelCase")]
#[schema(as = SearchAlert)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: String,

    pub name: String,

    pub min_price: Option<f64>,

    pub max_price: Option<f64>,

    pub property_type: Option<String>,

    pub neighborhood: Option<String>,

    /// Minimum bedroom count
    pub bedrooms: Option<i32>,

    /// Minimum bathroom count
    pub bathrooms: Option<f64>,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
