use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000006_create_order_table::Order;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(string(Payment::Id).primary_key())
                    .col(string(Payment::OrderId))
                    .col(double(Payment::Amount))
                    .col(string(Payment::Method))
                    .col(string(Payment::Status).default("pending"))
                    .col(string_uniq(Payment::TransactionId))
                    .col(string_null(Payment::CryptoAddress))
                    .col(timestamp_with_time_zone_null(Payment::ConfirmedAt))
                    .col(
                        timestamp_with_time_zone(Payment::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Payment::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_order_id")
                            .from(Payment::Table, Payment::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_order_id")
                    .table(Payment::Table)
                    .col(Payment::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    OrderId,
    Amount,
    Method,
    Status,
    TransactionId,
    CryptoAddress,
    ConfirmedAt,
    CreatedAt,
    UpdatedAt,
}
