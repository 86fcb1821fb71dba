use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000001_create_user_table::User, m20251001_000002_create_cafe_table::Cafe,
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
                    .table(LoyaltyMember::Table)
                    .if_not_exists()
                    .col(string(LoyaltyMember::Id).primary_key())
                    .col(string(LoyaltyMember::ProgramId))
                    .col(string(LoyaltyMember::UserId))
                    .col(string(LoyaltyMember::CafeId))
                    .col(integer(LoyaltyMember::CurrentPoints).default(0))
                    .col(integer(LoyaltyMember::TotalEarned).default(0))
                    .col(integer(LoyaltyMember::TotalRedeemed).default(0))
                    .col(string(LoyaltyMember::MemberTier).default("bronze"))
                    .col(timestamp_with_time_zone(LoyaltyMember::JoinedAt))
                    .col(timestamp_with_time_zone_null(LoyaltyMember::LastActivityAt))
                    .col(
                        timestamp_with_time_zone(LoyaltyMember::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(LoyaltyMember::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loyalty_member_program_id")
                            .from(LoyaltyMember::Table, LoyaltyMember::ProgramId)
                            .to(LoyaltyProgram::Table, LoyaltyProgram::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loyalty_member_user_id")
                            .from(LoyaltyMember::Table, LoyaltyMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loyalty_member_cafe_id")
                            .from(LoyaltyMember::Table, LoyaltyMember::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A user holds at most one membership per cafe
        manager
            .create_index(
                Index::create()
                    .name("idx_loyalty_member_user_cafe_unique")
                    .table(LoyaltyMember::Table)
                    .col(LoyaltyMember::UserId)
                    .col(LoyaltyMember::CafeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoyaltyMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LoyaltyMember {
    Table,
    Id,
    ProgramId,
    UserId,
    CafeId,
    CurrentPoints,
    TotalEarned,
    TotalRedeemed,
    MemberTier,
    JoinedAt,
    LastActivityAt,
    CreatedAt,
    UpdatedAt,
}
