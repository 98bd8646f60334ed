//! Database migrations for the brokerage listings API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_03_01_000001_create_properties;
mod m2025_03_01_000002_create_leads;
mod m2025_03_01_000003_create_saved_properties;
mod m2025_03_01_000004_create_search_alerts;
mod m2025_03_01_000005_create_resources;
mod m2025_03_01_000006_create_testimonials;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_03_01_000001_create_properties::Migration),
            Box::new(m2025_03_01_000002_create_leads::Migration),
            Box::new(m2025_03_01_000003_create_saved_properties::Migration),
            Box::new(m2025_03_01_000004_create_search_alerts::Migration),
            Box::new(m2025_03_01_000005_create_resources::Migration),
            Box::new(m2025_03_01_000006_create_testimonials::Migration),
        ]
    }
}
