//! # Data Models
//!
//! SeaORM entities for every table behind the listings API, plus the small
//! response types that are not backed by a table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod lead;
pub mod property;
pub mod resource;
pub mod saved_property;
pub mod search_alert;
pub mod testimonial;

pub use lead::Entity as Lead;
pub use property::Entity as Property;
pub use resource::Entity as Resource;
pub use saved_property::Entity as SavedProperty;
pub use search_alert::Entity as SearchAlert;
pub use testimonial::Entity as Testimonial;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "brokerage-listings".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
