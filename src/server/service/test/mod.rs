use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{error::AppError, model::user::User};

mod chat;
mod inventory;
mod loyalty;
mod menu;
mod user;

async fn load_user(db: &DatabaseConnection, id: &str) -> Result<User, AppError> {
    let model = entity::prelude::User::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(User::from_entity(model))
}

async fn count<E: EntityTrait>(db: &DatabaseConnection, _: E) -> Result<u64, AppError>
where
    E::Model: Sync,
{
    Ok(E::find().count(db).await?)
}
