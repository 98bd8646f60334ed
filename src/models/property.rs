//! Property entity model
//!
//! Listings shown on the public site. Feature and image lists are JSON arrays
//! of strings.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// A property listing
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "properties")]
#[serde(rename_all = "camelCase")]
#[schema(as = Property)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,

    pub description: String,

    /// Asking price in whole dollars
    pub price: f64,

    pub address: String,

    pub city: String,

    pub state: String,

    pub zip_code: String,

    pub neighborhood: String,

    pub bedrooms: i32,

    /// Bathroom count; half baths are expressed as `.5`
    pub bathrooms: f64,

    pub square_feet: i32,

    pub year_built: Option<i32>,

    pub property_type: String,

    /// Not advertised through standard listing channels
    pub is_off_market: bool,

    /// Foreclosure, short sale, probate and similar situations
    pub is_distressed: bool,

    pub distressed_type: Option<String>,

    /// Percentage below estimated market value
    pub discount_percentage: Option<f64>,

    pub rental_yield: Option<f64>,

    #[serde(rename = "potentialROI")]
    pub potential_roi: Option<f64>,

    #[sea_orm(column_type = "JsonBinary")]
    #[schema(value_type = Vec<String>)]
    pub features: JsonValue,

    #[sea_orm(column_type = "JsonBinary")]
    #[schema(value_type = Vec<String>)]
    pub images: JsonValue,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::saved_property::Entity")]
    SavedProperty,
    #[sea_orm(has_many = "super::lead::Entity")]
    Lead,
}

impl Related<super::saved_property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedProperty.def()
    }
}

impl Related<super::lead::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lead.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
