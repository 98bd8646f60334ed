//! # Listing Filters
//!
//! Converts the optional query parameters accepted by `GET /properties` into a
//! SeaORM [`Condition`]. Every parameter that is present and parses adds one
//! constraint and the constraints are AND-ed together.
//!
//! Saved search alerts go through the same [`PropertyCriteria`] so that alert
//! matches and listing searches can never drift apart.

use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::{property, search_alert};

/// Raw listing query parameters, exactly as sent by the client
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PropertyFilter {
    /// Lowest acceptable price
    pub min_price: Option<String>,
    /// Highest acceptable price
    pub max_price: Option<String>,
    /// Exact property type, e.g. `Condo`
    pub property_type: Option<String>,
    /// Exact neighborhood name
    pub neighborhood: Option<String>,
    /// Minimum bedroom count
    pub bedrooms: Option<String>,
    /// Minimum bathroom count (half baths allowed)
    pub bathrooms: Option<String>,
    /// Only off-market listings when exactly `true`
    pub is_off_market: Option<String>,
    /// Only distressed listings when exactly `true`
    pub is_distressed: Option<String>,
}

impl FromIterator<(String, String)> for PropertyFilter {
    /// Collect raw query pairs. A repeated key keeps its first value and
    /// unknown keys are ignored.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "minPrice" => &mut filter.min_price,
                "maxPrice" => &mut filter.max_price,
                "propertyType" => &mut filter.property_type,
                "neighborhood" => &mut filter.neighborhood,
                "bedrooms" => &mut filter.bedrooms,
                "bathrooms" => &mut filter.bathrooms,
                "isOffMarket" => &mut filter.is_off_market,
                "isDistressed" => &mut filter.is_distressed,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        filter
    }
}

/// Parsed listing criteria; `None` and `false` mean "no constraint"
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropertyCriteria {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: Option<String>,
    pub neighborhood: Option<String>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<f64>,
    pub off_market_only: bool,
    pub distressed_only: bool,
}

impl PropertyCriteria {
    /// Build the store predicate for these criteria.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(min_price) = self.min_price {
            condition = condition.add(property::Column::Price.gte(min_price));
        }
        if let Some(max_price) = self.max_price {
            condition = condition.add(property::Column::Price.lte(max_price));
        }
        if let Some(property_type) = &self.property_type {
            condition = condition.add(property::Column::PropertyType.eq(property_type.as_str()));
        }
        if let Some(neighborhood) = &self.neighborhood {
            condition = condition.add(property::Column::Neighborhood.eq(neighborhood.as_str()));
        }
        if let Some(bedrooms) = self.min_bedrooms {
            condition = condition.add(property::Column::Bedrooms.gte(bedrooms));
        }
        if let Some(bathrooms) = self.min_bathrooms {
            condition = condition.add(property::Column::Bathrooms.gte(bathrooms));
        }
        if self.off_market_only {
            condition = condition.add(property::Column::IsOffMarket.eq(true));
        }
        if self.distressed_only {
            condition = condition.add(property::Column::IsDistressed.eq(true));
        }

        condition
    }
}

impl From<&PropertyFilter> for PropertyCriteria {
    fn from(filter: &PropertyFilter) -> Self {
        Self {
            min_price: parse_decimal(filter.min_price.as_deref()),
            max_price: parse_decimal(filter.max_price.as_deref()),
            property_type: parse_text(filter.property_type.as_deref()),
            neighborhood: parse_text(filter.neighborhood.as_deref()),
            min_bedrooms: parse_count(filter.bedrooms.as_deref()),
            min_bathrooms: parse_decimal(filter.bathrooms.as_deref()),
            off_market_only: parse_flag(filter.is_off_market.as_deref()),
            distressed_only: parse_flag(filter.is_distressed.as_deref()),
        }
    }
}

impl From<&search_alert::Model> for PropertyCriteria {
    fn from(alert: &search_alert::Model) -> Self {
        Self {
            min_price: alert.min_price.filter(|value| value.is_finite()),
            max_price: alert.max_price.filter(|value| value.is_finite()),
            property_type: parse_text(alert.property_type.as_deref()),
            neighborhood: parse_text(alert.neighborhood.as_deref()),
            min_bedrooms: alert.bedrooms,
            min_bathrooms: alert.bathrooms.filter(|value| value.is_finite()),
            off_market_only: false,
            distressed_only: false,
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_decimal(raw: Option<&str>) -> Option<f64> {
    non_blank(raw)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn parse_count(raw: Option<&str>) -> Option<i32> {
    non_blank(raw)?.parse::<i32>().ok()
}

fn parse_text(raw: Option<&str>) -> Option<String> {
    non_blank(raw).map(str::to_string)
}

// Only the literal "true" turns a flag on.
fn parse_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}
