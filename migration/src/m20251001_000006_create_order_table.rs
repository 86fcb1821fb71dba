use sea_orm_migration::{prelude::*, schema::*};

use super::{m20251001_000001_create_user_table::User, m20251001_000002_create_cafe_table::Cafe};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(string(Order::Id).primary_key())
                    .col(string(Order::CafeId))
                    .col(string(Order::UserId))
                    .col(string_uniq(Order::OrderNumber))
                    .col(string(Order::Status).default("pending"))
                    .col(double(Order::TotalAmount))
                    .col(double(Order::SubtotalAmount))
                    .col(double(Order::TaxAmount).default(0.0))
                    .col(double(Order::ServiceCharge).default(0.0))
                    .col(double(Order::DeliveryFee).default(0.0))
                    .col(string(Order::PaymentMethod))
                    .col(string(Order::PaymentStatus).default("pending"))
                    .col(string_null(Order::PaymentId))
                    .col(string(Order::CustomerName))
                    .col(string_null(Order::CustomerPhone))
                    .col(string(Order::OrderType))
                    .col(string_null(Order::TableNumber))
                    .col(text_null(Order::DeliveryAddress))
                    .col(text_null(Order::Notes))
                    .col(timestamp_with_time_zone_null(Order::CompletedAt))
                    .col(timestamp_with_time_zone(Order::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Order::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_cafe_id")
                            .from(Order::Table, Order::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_user_id")
                            .from(Order::Table, Order::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_cafe_id")
                    .table(Order::Table)
                    .col(Order::CafeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_user_id")
                    .table(Order::Table)
                    .col(Order::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Order {
    Table,
    Id,
    CafeId,
    UserId,
    OrderNumber,
    Status,
    TotalAmount,
    SubtotalAmount,
    TaxAmount,
    ServiceCharge,
    DeliveryFee,
    PaymentMethod,
    PaymentStatus,
    PaymentId,
    CustomerName,
    CustomerPhone,
    OrderType,
    TableNumber,
    DeliveryAddress,
    Notes,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}
