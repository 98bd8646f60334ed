//! Migration to create the search_alerts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchAlerts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchAlerts::UserId).text().not_null())
                    .col(ColumnDef::new(SearchAlerts::Name).text().not_null())
                    .col(ColumnDef::new(SearchAlerts::MinPrice).double().null())
                    .col(ColumnDef::new(SearchAlerts::MaxPrice).double().null())
                    .col(ColumnDef::new(SearchAlerts::PropertyType).text().null())
                    .col(ColumnDef::new(SearchAlerts::Neighborhood).text().null())
                    .col(ColumnDef::new(SearchAlerts::Bedrooms).integer().null())
                    .col(ColumnDef::new(SearchAlerts::Bathrooms).double().null())
                    .col(
                        ColumnDef::new(SearchAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_alerts_user_id")
                    .table(SearchAlerts::Table)
                    .col(SearchAlerts::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_search_alerts_user_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SearchAlerts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchAlerts {
    Table,
    Id,
    UserId,
    Name,
    MinPrice,
    MaxPrice,
    PropertyType,
    Neighborhood,
    Bedrooms,
    Bathrooms,
    CreatedAt,
}
