use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000002_create_cafe_table::Cafe,
    m20251001_000011_create_loyalty_program_table::LoyaltyProgram,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoyaltyReward::Table)
                    .if_not_exists()
                    .col(string(LoyaltyReward::Id).primary_key())
                    .col(string(LoyaltyReward::ProgramId))
                    .col(string(LoyaltyReward::CafeId))
                    .col(string(LoyaltyReward::Name))
                    .col(text_null(LoyaltyReward::Description))
                    .col(string(LoyaltyReward::RewardType))
                    .col(integer(LoyaltyReward::PointsCost))
                    .col(double(LoyaltyReward::DiscountValue).default(0.0))
                    .col(string_null(LoyaltyReward::DiscountType))
                    .col(string_null(LoyaltyReward::FreeItemId))
                    .col(double(LoyaltyReward::MinOrderValue).default(0.0))
                    .col(integer(LoyaltyReward::MaxUses).default(0))
                    .col(integer(LoyaltyReward::CurrentUses).default(0))
                    .col(boolean(LoyaltyReward::IsActive).default(true))
                    .col(timestamp_with_time_zone_null(LoyaltyReward::ValidFrom))
                    .col(timestamp_with_time_zone_null(LoyaltyReward::ValidUntil))
                    .col(text_null(LoyaltyReward::Conditions))
                    .col(
                        timestamp_with_time_zone(LoyaltyReward::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(LoyaltyReward::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loyalty_reward_program_id")
                            .from(LoyaltyReward::Table, LoyaltyReward::ProgramId)
                            .to(LoyaltyProgram::Table, LoyaltyProgram::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loyalty_reward_cafe_id")
                            .from(LoyaltyReward::Table, LoyaltyReward::CafeId)
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
            .drop_table(Table::drop().table(LoyaltyReward::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LoyaltyReward {
    Table,
    Id,
    ProgramId,
    CafeId,
    Name,
    Description,
    RewardType,
    PointsCost,
    DiscountValue,
    DiscountType,
    FreeItemId,
    MinOrderValue,
    MaxUses,
    CurrentUses,
    IsActive,
    ValidFrom,
    ValidUntil,
    Conditions,
    CreatedAt,
    UpdatedAt,
}
