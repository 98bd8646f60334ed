//! Property listings binding.

use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Patchable, RequiredFields, Resource, assign, nullable};
use crate::auth::{AccessPolicy, Session};
use crate::config::AppConfig;
use crate::error::{ApiError, not_found, store_error};
use crate::models::property::{ActiveModel, Column, Entity, Model};

pub struct Properties;

/// Body of `POST /properties`
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub neighborhood: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i32>,
    pub year_built: Option<i32>,
    pub property_type: Option<String>,
    pub is_off_market: Option<bool>,
    pub is_distressed: Option<bool>,
    pub distressed_type: Option<String>,
    pub discount_percentage: Option<f64>,
    pub rental_yield: Option<f64>,
    #[serde(rename = "potentialROI")]
    pub potential_roi: Option<f64>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

/// Body of `PATCH /properties/{id}`; absent fields are left as stored and
/// `null` clears an optional field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchProperty {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub neighborhood: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i32>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<i32>)]
    pub year_built: Option<Option<i32>>,
    pub property_type: Option<String>,
    pub is_off_market: Option<bool>,
    pub is_distressed: Option<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub distressed_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub discount_percentage: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub rental_yield: Option<Option<f64>>,
    #[serde(default, rename = "potentialROI", deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub potential_roi: Option<Option<f64>>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

impl Resource for Properties {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;
    type Create = CreateProperty;

    const LABEL: &'static str = "Property";
    const LOG_TAG: &'static str = "PROPERTY";

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

    fn missing_fields(body: &CreateProperty) -> Vec<&'static str> {
        RequiredFields::new()
            .text("title", &body.title)
            .text("description", &body.description)
            .value("price", &body.price)
            .text("address", &body.address)
            .text("city", &body.city)
            .text("state", &body.state)
            .text("zipCode", &body.zip_code)
            .text("neighborhood", &body.neighborhood)
            .value("bedrooms", &body.bedrooms)
            .value("bathrooms", &body.bathrooms)
            .value("squareFeet", &body.square_feet)
            .text("propertyType", &body.property_type)
            .finish()
    }

    fn new_row(body: CreateProperty, _session: Option<&Session>) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(body.title.unwrap_or_default()),
            description: Set(body.description.unwrap_or_default()),
            price: Set(body.price.unwrap_or_default()),
            address: Set(body.address.unwrap_or_default()),
            city: Set(body.city.unwrap_or_default()),
            state: Set(body.state.unwrap_or_default()),
            zip_code: Set(body.zip_code.unwrap_or_default()),
            neighborhood: Set(body.neighborhood.unwrap_or_default()),
            bedrooms: Set(body.bedrooms.unwrap_or_default()),
            bathrooms: Set(body.bathrooms.unwrap_or_default()),
            square_feet: Set(body.square_feet.unwrap_or_default()),
            year_built: Set(body.year_built),
            property_type: Set(body.property_type.unwrap_or_default()),
            is_off_market: Set(body.is_off_market.unwrap_or(false)),
            is_distressed: Set(body.is_distressed.unwrap_or(false)),
            distressed_type: Set(body.distressed_type),
            discount_percentage: Set(body.discount_percentage),
            rental_yield: Set(body.rental_yield),
            potential_roi: Set(body.potential_roi),
            features: Set(JsonValue::from(body.features.unwrap_or_default())),
            images: Set(JsonValue::from(body.images.unwrap_or_default())),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

impl Patchable for Properties {
    type Patch = PatchProperty;

    fn blank_fields(patch: &PatchProperty) -> Vec<&'static str> {
        RequiredFields::new()
            .text_if_present("title", &patch.title)
            .text_if_present("description", &patch.description)
            .text_if_present("address", &patch.address)
            .text_if_present("city", &patch.city)
            .text_if_present("state", &patch.state)
            .text_if_present("zipCode", &patch.zip_code)
            .text_if_present("neighborhood", &patch.neighborhood)
            .text_if_present("propertyType", &patch.property_type)
            .finish()
    }

    fn apply_patch(row: &mut ActiveModel, patch: PatchProperty) {
        assign(&mut row.title, patch.title);
        assign(&mut row.description, patch.description);
        assign(&mut row.price, patch.price);
        assign(&mut row.address, patch.address);
        assign(&mut row.city, patch.city);
        assign(&mut row.state, patch.state);
        assign(&mut row.zip_code, patch.zip_code);
        assign(&mut row.neighborhood, patch.neighborhood);
        assign(&mut row.bedrooms, patch.bedrooms);
        assign(&mut row.bathrooms, patch.bathrooms);
        assign(&mut row.square_feet, patch.square_feet);
        assign(&mut row.year_built, patch.year_built);
        assign(&mut row.property_type, patch.property_type);
        assign(&mut row.is_off_market, patch.is_off_market);
        assign(&mut row.is_distressed, patch.is_distressed);
        assign(&mut row.distressed_type, patch.distressed_type);
        assign(&mut row.discount_percentage, patch.discount_percentage);
        assign(&mut row.rental_yield, patch.rental_yield);
        assign(&mut row.potential_roi, patch.potential_roi);
        assign(&mut row.features, patch.features.map(JsonValue::from));
        assign(&mut row.images, patch.images.map(JsonValue::from));
    }
}

/// 404 unless the listing exists. Shared by bindings that reference a property.
pub(crate) async fn ensure_exists(db: &DatabaseConnection, id: Uuid, tag: &str) -> Result<(), ApiError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|err| store_error(tag, err))?
        .map(|_| ())
        .ok_or_else(|| not_found("Property not found"))
}
