use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000002_create_cafe_table::Cafe, m20251001_000009_create_inventory_table::Inventory,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockMovement::Table)
                    .if_not_exists()
                    .col(string(StockMovement::Id).primary_key())
                    .col(string(StockMovement::InventoryId))
                    .col(string(StockMovement::CafeId))
                    .col(string(StockMovement::MovementType))
                    .col(double(StockMovement::Quantity))
                    .col(double(StockMovement::UnitCost).default(0.0))
                    .col(double(StockMovement::TotalCost).default(0.0))
                    .col(double(StockMovement::BalanceAfter))
                    .col(string(StockMovement::Reason))
                    .col(string_null(StockMovement::ReferenceId))
                    .col(text_null(StockMovement::Notes))
                    .col(string(StockMovement::PerformedBy))
                    .col(
                        timestamp_with_time_zone(StockMovement::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(StockMovement::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movement_inventory_id")
                            .from(StockMovement::Table, StockMovement::InventoryId)
                            .to(Inventory::Table, Inventory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movement_cafe_id")
                            .from(StockMovement::Table, StockMovement::CafeId)
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
                    .name("idx_stock_movement_inventory_id")
                    .table(StockMovement::Table)
                    .col(StockMovement::InventoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockMovement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StockMovement {
    Table,
    Id,
    InventoryId,
    CafeId,
    MovementType,
    Quantity,
    UnitCost,
    TotalCost,
    BalanceAfter,
    Reason,
    ReferenceId,
    Notes,
    PerformedBy,
    CreatedAt,
    UpdatedAt,
}
