use sea_orm_migration::{prelude::*, schema::*};

use super::m20251001_000012_create_loyalty_member_table::LoyaltyMember;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoyaltyTransaction::Table)
                    .if_not_exists()
                    .col(string(LoyaltyTransaction::Id).primary_key())
                    .col(string(LoyaltyTransaction::ProgramId))
                    .col(string(LoyaltyTransaction::MemberId))
                    .col(string(LoyaltyTransaction::CafeId))
                    .col(string_null(LoyaltyTransaction::OrderId))
                    .col(string(LoyaltyTransaction::TransactionType))
                    .col(integer(LoyaltyTransaction::Points))
                    .col(integer(LoyaltyTransaction::BalanceAfter))
                    .col(string(LoyaltyTransaction::Description))
                    .col(string_null(LoyaltyTransaction::ReferenceId))
                    .col(
                        timestamp_with_time_zone(LoyaltyTransaction::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(LoyaltyTransaction::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loyalty_transaction_member_id")
                            .from(LoyaltyTransaction::Table, LoyaltyTransaction::MemberId)
                            .to(LoyaltyMember::Table, LoyaltyMember::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_loyalty_transaction_member_id")
                    .table(LoyaltyTransaction::Table)
                    .col(LoyaltyTransaction::MemberId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoyaltyTransaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LoyaltyTransaction {
    Table,
    Id,
    ProgramId,
    MemberId,
    CafeId,
    OrderId,
    TransactionType,
    Points,
    BalanceAfter,
    Description,
    ReferenceId,
    CreatedAt,
    UpdatedAt,
}
