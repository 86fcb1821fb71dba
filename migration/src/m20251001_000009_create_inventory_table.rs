use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000002_create_cafe_table::Cafe;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(string(Inventory::Id).primary_key())
                    .col(string(Inventory::CafeId))
                    .col(string(Inventory::Name))
                    .col(text_null(Inventory::Description))
                    .col(string(Inventory::Category))
                    .col(string(Inventory::Unit))
                    .col(double(Inventory::CurrentStock).default(0.0))
                    .col(double(Inventory::MinStockLevel).default(0.0))
                    .col(double(Inventory::MaxStockLevel).default(0.0))
                    .col(double(Inventory::UnitCost).default(0.0))
                    .col(string_null(Inventory::Supplier))
                    .col(string_null(Inventory::SupplierContact))
                    .col(timestamp_with_time_zone_null(Inventory::LastRestocked))
                    .col(timestamp_with_time_zone_null(Inventory::ExpiryDate))
                    .col(string_null(Inventory::Location))
                    .col(boolean(Inventory::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Inventory::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Inventory::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Inventory::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_cafe_id")
                            .from(Inventory::Table, Inventory::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_cafe_id")
                    .table(Inventory::Table)
                    .col(Inventory::CafeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Inventory {
    Table,
    Id,
    CafeId,
    Name,
    Description,
    Category,
    Unit,
    CurrentStock,
    MinStockLevel,
    MaxStockLevel,
    UnitCost,
    Supplier,
    SupplierContact,
    LastRestocked,
    ExpiryDate,
    Location,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
