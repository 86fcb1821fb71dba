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
                    .table(CafeReview::Table)
                    .if_not_exists()
                    .col(string(CafeReview::Id).primary_key())
                    .col(string(CafeReview::CafeId))
                    .col(string(CafeReview::UserId))
                    .col(integer(CafeReview::Rating))
                    .col(text_null(CafeReview::Comment))
                    .col(boolean(CafeReview::IsVerified).default(false))
                    .col(
                        timestamp_with_time_zone(CafeReview::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CafeReview::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(CafeReview::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cafe_review_cafe_id")
                            .from(CafeReview::Table, CafeReview::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cafe_review_user_id")
                            .from(CafeReview::Table, CafeReview::UserId)
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
                    .name("idx_cafe_review_cafe_user")
                    .table(CafeReview::Table)
                    .col(CafeReview::CafeId)
                    .col(CafeReview::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CafeReview::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CafeReview {
    Table,
    Id,
    CafeId,
    UserId,
    Rating,
    Comment,
    IsVerified,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
