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
                    .table(LoyaltyProgram::Table)
                    .if_not_exists()
                    .col(string(LoyaltyProgram::Id).primary_key())
                    .col(string_uniq(LoyaltyProgram::CafeId))
                    .col(string(LoyaltyProgram::Name))
                    .col(text_null(LoyaltyProgram::Description))
                    .col(double(LoyaltyProgram::PointsPerCurrency).default(1.0))
                    .col(double(LoyaltyProgram::CurrencyPerPoint).default(1000.0))
                    .col(double(LoyaltyProgram::MinOrderForPoints).default(0.0))
                    .col(integer(LoyaltyProgram::PointsExpiryMonths).default(12))
                    .col(boolean(LoyaltyProgram::IsActive).default(true))
                    .col(text_null(LoyaltyProgram::TierRules))
                    .col(
                        timestamp_with_time_zone(LoyaltyProgram::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(LoyaltyProgram::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loyalty_program_cafe_id")
                            .from(LoyaltyProgram::Table, LoyaltyProgram::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoyaltyProgram::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LoyaltyProgram {
    Table,
    Id,
    CafeId,
    Name,
    Description,
    PointsPerCurrency,
    CurrencyPerPoint,
    MinOrderForPoints,
    PointsExpiryMonths,
    IsActive,
    TierRules,
    CreatedAt,
    UpdatedAt,
}
