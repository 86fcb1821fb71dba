use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::cafe::Cafe;

pub struct FavoriteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FavoriteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds a favorite, returning the existing row if the cafe is already a favorite.
    pub async fn add(&self, user_id: &str, cafe_id: &str) -> Result<entity::favorite::Model, DbErr> {
        if let Some(existing) = self.find(user_id, cafe_id).await? {
            return Ok(existing);
        }

        entity::favorite::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            cafe_id: ActiveValue::Set(cafe_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Removes a favorite. Returns false when it did not exist.
    pub async fn remove(&self, user_id: &str, cafe_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Favorite::delete_many()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::CafeId.eq(cafe_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists the user's favorites, newest first, skipping deleted cafes.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<(entity::favorite::Model, Cafe)>, DbErr> {
        let favorites = entity::prelude::Favorite::find()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .order_by_desc(entity::favorite::Column::CreatedAt)
            .all(self.db)
            .await?;

        let mut result = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            let cafe = entity::prelude::Cafe::find_by_id(favorite.cafe_id.clone())
                .filter(entity::cafe::Column::DeletedAt.is_null())
                .one(self.db)
                .await?;
            if let Some(cafe) = cafe {
                result.push((favorite, Cafe::from_entity(cafe)));
            }
        }

        Ok(result)
    }

    async fn find(
        &self,
        user_id: &str,
        cafe_id: &str,
    ) -> Result<Option<entity::favorite::Model>, DbErr> {
        entity::prelude::Favorite::find()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::CafeId.eq(cafe_id))
            .one(self.db)
            .await
    }
}
