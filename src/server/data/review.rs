use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::{
    cafe::Review,
    page::{PageRequest, Paginated},
};

pub struct ReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        cafe_id: &str,
        user_id: &str,
        rating: i32,
        comment: Option<String>,
    ) -> Result<entity::cafe_review::Model, DbErr> {
        let now = Utc::now();
        entity::cafe_review::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            cafe_id: ActiveValue::Set(cafe_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            rating: ActiveValue::Set(rating),
            comment: ActiveValue::Set(comment),
            is_verified: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }

    /// Whether the user already has a live review of the cafe.
    pub async fn exists_for_user(&self, cafe_id: &str, user_id: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::CafeReview::find()
            .filter(entity::cafe_review::Column::CafeId.eq(cafe_id))
            .filter(entity::cafe_review::Column::UserId.eq(user_id))
            .filter(entity::cafe_review::Column::DeletedAt.is_null())
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Ratings of all live reviews of a cafe.
    pub async fn ratings_for_cafe(&self, cafe_id: &str) -> Result<Vec<i32>, DbErr> {
        let reviews = entity::prelude::CafeReview::find()
            .filter(entity::cafe_review::Column::CafeId.eq(cafe_id))
            .filter(entity::cafe_review::Column::DeletedAt.is_null())
            .all(self.db)
            .await?;

        Ok(reviews.into_iter().map(|r| r.rating).collect())
    }

    /// Lists reviews of a cafe, newest first, each with its reviewer.
    pub async fn list_for_cafe(
        &self,
        cafe_id: &str,
        page: PageRequest,
    ) -> Result<Paginated<Review>, DbErr> {
        let paginator = entity::prelude::CafeReview::find()
            .filter(entity::cafe_review::Column::CafeId.eq(cafe_id))
            .filter(entity::cafe_review::Column::DeletedAt.is_null())
            .order_by_desc(entity::cafe_review::Column::CreatedAt)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let reviews = paginator.fetch_page(page.index()).await?;

        let user_ids: Vec<String> = reviews.iter().map(|r| r.user_id.clone()).collect();
        let users: HashMap<String, entity::user::Model> = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids))
            .filter(entity::user::Column::DeletedAt.is_null())
            .all(self.db)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let reviews = reviews
            .into_iter()
            .map(|r| {
                let reviewer = users.get(&r.user_id).cloned();
                Review::from_entity(r, reviewer)
            })
            .collect();

        Ok(Paginated::new(reviews, total, page))
    }
}
