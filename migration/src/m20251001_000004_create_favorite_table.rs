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
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(string(Favorite::Id).primary_key())
                    .col(string(Favorite::UserId))
                    .col(string(Favorite::CafeId))
                    .col(
                        timestamp_with_time_zone(Favorite::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user_id")
                            .from(Favorite::Table, Favorite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_cafe_id")
                            .from(Favorite::Table, Favorite::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One favorite entry per user per cafe
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user_cafe_unique")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .col(Favorite::CafeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Favorite {
    Table,
    Id,
    UserId,
    CafeId,
    CreatedAt,
}
