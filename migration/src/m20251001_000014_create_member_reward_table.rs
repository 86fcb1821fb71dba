use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000012_create_loyalty_member_table::LoyaltyMember,
    m20251001_000013_create_loyalty_reward_table::LoyaltyReward,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberReward::Table)
                    .if_not_exists()
                    .col(string(MemberReward::Id).primary_key())
                    .col(string(MemberReward::MemberId))
                    .col(string(MemberReward::RewardId))
                    .col(string(MemberReward::ProgramId))
                    .col(string(MemberReward::CafeId))
                    .col(string_null(MemberReward::OrderId))
                    .col(string(MemberReward::Status).default("available"))
                    .col(timestamp_with_time_zone_null(MemberReward::UsedAt))
                    .col(timestamp_with_time_zone_null(MemberReward::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(MemberReward::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MemberReward::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_reward_member_id")
                            .from(MemberReward::Table, MemberReward::MemberId)
                            .to(LoyaltyMember::Table, LoyaltyMember::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_reward_reward_id")
                            .from(MemberReward::Table, MemberReward::RewardId)
                            .to(LoyaltyReward::Table, LoyaltyReward::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_reward_member_id")
                    .table(MemberReward::Table)
                    .col(MemberReward::MemberId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberReward::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MemberReward {
    Table,
    Id,
    MemberId,
    RewardId,
    ProgramId,
    CafeId,
    OrderId,
    Status,
    UsedAt,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
