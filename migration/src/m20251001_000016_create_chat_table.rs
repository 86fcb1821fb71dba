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
                    .table(Chat::Table)
                    .if_not_exists()
                    .col(string(Chat::Id).primary_key())
                    .col(string(Chat::UserId))
                    .col(string(Chat::SessionId))
                    .col(text(Chat::Message))
                    .col(boolean(Chat::IsAi).default(false))
                    .col(text_null(Chat::Context))
                    .col(string(Chat::Intent).default("general"))
                    .col(boolean(Chat::Processed).default(false))
                    .col(timestamp_with_time_zone(Chat::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Chat::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_user_id")
                            .from(Chat::Table, Chat::UserId)
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
                    .name("idx_chat_user_session")
                    .table(Chat::Table)
                    .col(Chat::UserId)
                    .col(Chat::SessionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Chat {
    Table,
    Id,
    UserId,
    SessionId,
    Message,
    IsAi,
    Context,
    Intent,
    Processed,
    CreatedAt,
    UpdatedAt,
}
