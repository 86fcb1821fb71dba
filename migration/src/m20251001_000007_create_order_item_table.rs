use sea_orm_migration::{prelude::*, schema::*};

use super::{m20251001_000005_create_menu_table::Menu, m20251001_000006_create_order_table::Order};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderItem::Table)
                    .if_not_exists()
                    .col(string(OrderItem::Id).primary_key())
                    .col(string(OrderItem::OrderId))
                    .col(string(OrderItem::MenuId))
                    .col(integer(OrderItem::Quantity))
                    .col(double(OrderItem::UnitPrice))
                    .col(double(OrderItem::TotalPrice))
                    .col(text_null(OrderItem::Notes))
                    .col(
                        timestamp_with_time_zone(OrderItem::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(OrderItem::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_item_order_id")
                            .from(OrderItem::Table, OrderItem::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_item_menu_id")
                            .from(OrderItem::Table, OrderItem::MenuId)
                            .to(Menu::Table, Menu::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_item_order_id")
                    .table(OrderItem::Table)
                    .col(OrderItem::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OrderItem {
    Table,
    Id,
    OrderId,
    MenuId,
    Quantity,
    UnitPrice,
    TotalPrice,
    Notes,
    CreatedAt,
    UpdatedAt,
}
