use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cafe::Table)
                    .if_not_exists()
                    .col(string(Cafe::Id).primary_key())
                    .col(string(Cafe::OwnerId))
                    .col(string(Cafe::Name))
                    .col(text_null(Cafe::Description))
                    .col(string_null(Cafe::LogoUrl))
                    .col(string_null(Cafe::CoverImageUrl))
                    .col(text_null(Cafe::Address))
                    .col(string_null(Cafe::City))
                    .col(string_null(Cafe::Province))
                    .col(string_null(Cafe::PostalCode))
                    .col(string_null(Cafe::Phone))
                    .col(string_null(Cafe::Email))
                    .col(string_null(Cafe::Website))
                    .col(double(Cafe::CoordinateLat).default(0.0))
                    .col(double(Cafe::CoordinateLng).default(0.0))
                    .col(text_null(Cafe::BusinessHours))
                    .col(boolean(Cafe::IsOpen).default(true))
                    .col(boolean(Cafe::IsVerified).default(false))
                    .col(double(Cafe::RatingAverage).default(0.0))
                    .col(integer(Cafe::RatingCount).default(0))
                    .col(double(Cafe::TaxPercentage).default(10.0))
                    .col(double(Cafe::ServiceChargePercentage).default(0.0))
                    .col(double(Cafe::DeliveryFee).default(0.0))
                    .col(double(Cafe::MinOrderAmount).default(0.0))
                    .col(double(Cafe::MaxDeliveryDistance).default(5.0))
                    .col(text_null(Cafe::Features))
                    .col(string(Cafe::Status).default("active"))
                    .col(timestamp_with_time_zone(Cafe::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Cafe::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone_null(Cafe::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cafe_owner_id")
                            .from(Cafe::Table, Cafe::OwnerId)
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
                    .name("idx_cafe_owner_id")
                    .table(Cafe::Table)
                    .col(Cafe::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cafe_owner_id")
                    .table(Cafe::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Cafe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Cafe {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    LogoUrl,
    CoverImageUrl,
    Address,
    City,
    Province,
    PostalCode,
    Phone,
    Email,
    Website,
    CoordinateLat,
    CoordinateLng,
    BusinessHours,
    IsOpen,
    IsVerified,
    RatingAverage,
    RatingCount,
    TaxPercentage,
    ServiceChargePercentage,
    DeliveryFee,
    MinOrderAmount,
    MaxDeliveryDistance,
    Features,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
