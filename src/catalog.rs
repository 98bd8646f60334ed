//! Option lists offered by the listing filters and search alert form.

use serde::Serialize;
use utoipa::ToSchema;

pub const PROPERTY_TYPES: &[&str] = &[
    "Single-Family Home",
    "Multi-Family",
    "Condo",
    "Townhouse",
    "Commercial",
    "Vacant Land",
];

pub const NEIGHBORHOODS: &[&str] = &[
    "The Fan District",
    "Scott's Addition",
    "Manchester",
    "Church Hill",
    "Shockoe Bottom",
    "Short Pump",
    "Midlothian",
    "West End",
    "Highland Springs",
    "Sandston",
    "North Richmond",
    "South Richmond",
    "Museum District",
    "Jackson Ward",
    "Oregon Hill",
];

pub const DISTRESSED_TYPES: &[&str] = &[
    "Pre-Foreclosure",
    "Foreclosure",
    "Bank-Owned (REO)",
    "Short Sale",
    "Probate",
    "Tax Lien",
    "Fixer-Upper",
];

/// All option lists in one response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub property_types: Vec<String>,
    pub neighborhoods: Vec<String>,
    pub distressed_types: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            property_types: owned(PROPERTY_TYPES),
            neighborhoods: owned(NEIGHBORHOODS),
            distressed_types: owned(DISTRESSED_TYPES),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
