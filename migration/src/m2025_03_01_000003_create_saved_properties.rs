//! Migration to create the saved_properties table.
//!
//! A user can save a given listing once; saves disappear with the listing.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedProperties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedProperties::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedProperties::UserId).text().not_null())
                    .col(ColumnDef::new(SavedProperties::PropertyId).uuid().not_null())
                    .col(
                        ColumnDef::new(SavedProperties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_properties_property_id")
                            .from(SavedProperties::Table, SavedProperties::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_properties_user_property")
                    .table(SavedProperties::Table)
                    .col(SavedProperties::UserId)
                    .col(SavedProperties::PropertyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_saved_properties_user_property")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SavedProperties::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SavedProperties {
    Table,
    Id,
    UserId,
    PropertyId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
}
