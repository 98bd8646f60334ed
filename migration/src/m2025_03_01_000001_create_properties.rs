//! Migration to create the properties table.
//!
//! Listings carry their address, sizing and investment figures inline; feature
//! and image lists are stored as JSON arrays.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::Title).text().not_null())
                    .col(ColumnDef::new(Properties::Description).text().not_null())
                    .col(ColumnDef::new(Properties::Price).double().not_null())
                    .col(ColumnDef::new(Properties::Address).text().not_null())
                    .col(ColumnDef::new(Properties::City).text().not_null())
                    .col(ColumnDef::new(Properties::State).text().not_null())
                    .col(ColumnDef::new(Properties::ZipCode).text().not_null())
                    .col(ColumnDef::new(Properties::Neighborhood).text().not_null())
                    .col(ColumnDef::new(Properties::Bedrooms).integer().not_null())
                    .col(ColumnDef::new(Properties::Bathrooms).double().not_null())
                    .col(ColumnDef::new(Properties::SquareFeet).integer().not_null())
                    .col(ColumnDef::new(Properties::YearBuilt).integer().null())
                    .col(ColumnDef::new(Properties::PropertyType).text().not_null())
                    .col(
                        ColumnDef::new(Properties::IsOffMarket)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Properties::IsDistressed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Properties::DistressedType).text().null())
                    .col(
                        ColumnDef::new(Properties::DiscountPercentage)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(Properties::RentalYield).double().null())
                    .col(ColumnDef::new(Properties::PotentialRoi).double().null())
                    .col(ColumnDef::new(Properties::Features).json_binary().not_null())
                    .col(ColumnDef::new(Properties::Images).json_binary().not_null())
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing pages sort newest first and filter by price
        manager
            .create_index(
                Index::create()
                    .name("idx_properties_created_at")
                    .table(Properties::Table)
                    .col(Properties::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_price")
                    .table(Properties::Table)
                    .col(Properties::Price)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_properties_price").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_properties_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Title,
    Description,
    Price,
    Address,
    City,
    State,
    ZipCode,
    Neighborhood,
    Bedrooms,
    Bathrooms,
    SquareFeet,
    YearBuilt,
    PropertyType,
    IsOffMarket,
    IsDistressed,
    DistressedType,
    DiscountPercentage,
    RentalYield,
    PotentialRoi,
    Features,
    Images,
    CreatedAt,
}
