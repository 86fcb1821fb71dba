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
                    .table(Menu::Table)
                    .if_not_exists()
                    .col(string(Menu::Id).primary_key())
                    .col(string(Menu::CafeId))
                    .col(string(Menu::Name))
                    .col(text_null(Menu::Description))
                    .col(string(Menu::Category))
                    .col(double(Menu::Price))
                    .col(string_null(Menu::ImageUrl))
                    .col(boolean(Menu::IsAvailable).default(true))
                    .col(text_null(Menu::Ingredients))
                    .col(integer(Menu::PrepTime).default(0))
                    .col(boolean(Menu::IsPopular).default(false))
                    .col(boolean(Menu::IsRecommended).default(false))
                    .col(integer(Menu::Calories).default(0))
                    .col(string_null(Menu::Allergens))
                    .col(boolean(Menu::Customizable).default(false))
                    .col(timestamp_with_time_zone(Menu::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Menu::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone_null(Menu::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_cafe_id")
                            .from(Menu::Table, Menu::CafeId)
                            .to(Cafe::Table, Cafe::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_cafe_id")
                    .table(Menu::Table)
                    .col(Menu::CafeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Menu::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Menu {
    Table,
    Id,
    CafeId,
    Name,
    Description,
    Category,
    Price,
    ImageUrl,
    IsAvailable,
    Ingredients,
    PrepTime,
    IsPopular,
    IsRecommended,
    Calories,
    Allergens,
    Customizable,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
