use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::menu::{CreateMenuParams, Menu, UpdateMenuParams};

pub struct MenuRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MenuRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateMenuParams) -> Result<Menu, DbErr> {
        let now = Utc::now();
        let menu = entity::menu::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            cafe_id: ActiveValue::Set(params.cafe_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            price: ActiveValue::Set(params.price),
            image_url: ActiveValue::Set(params.image_url),
            is_available: ActiveValue::Set(true),
            ingredients: ActiveValue::Set(params.ingredients),
            prep_time: ActiveValue::Set(params.prep_time),
            is_popular: ActiveValue::Set(params.is_popular),
            is_recommended: ActiveValue::Set(params.is_recommended),
            calories: ActiveValue::Set(params.calories),
            allergens: ActiveValue::Set(params.allergens),
            customizable: ActiveValue::Set(params.customizable),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(Menu::from_entity(menu))
    }

    /// Finds a non-deleted menu item, available or not.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Menu>, DbErr> {
        Ok(self.find_model(id).await?.map(Menu::from_entity))
    }

    /// Finds a menu item that can currently be ordered.
    pub async fn find_orderable(&self, id: &str) -> Result<Option<Menu>, DbErr> {
        let menu = entity::prelude::Menu::find_by_id(id.to_string())
            .filter(entity::menu::Column::DeletedAt.is_null())
            .filter(entity::menu::Column::IsAvailable.eq(true))
            .one(self.db)
            .await?;

        Ok(menu.map(Menu::from_entity))
    }

    /// Loads menus by ID for display, including deleted ones still referenced by orders.
    pub async fn find_by_ids(&self, ids: Vec<String>) -> Result<HashMap<String, Menu>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let menus = entity::prelude::Menu::find()
            .filter(entity::menu::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(menus
            .into_iter()
            .map(|m| (m.id.clone(), Menu::from_entity(m)))
            .collect())
    }

    /// Lists available menus of a cafe ordered by category, then name.
    pub async fn list_available_by_cafe(
        &self,
        cafe_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<Menu>, DbErr> {
        let mut query = entity::prelude::Menu::find()
            .filter(entity::menu::Column::CafeId.eq(cafe_id))
            .filter(entity::menu::Column::DeletedAt.is_null())
            .filter(entity::menu::Column::IsAvailable.eq(true));

        if let Some(category) = category.filter(|c| !c.is_empty()) {
            query = query.filter(entity::menu::Column::Category.eq(category));
        }

        let menus = query
            .order_by_asc(entity::menu::Column::Category)
            .order_by_asc(entity::menu::Column::Name)
            .all(self.db)
            .await?;

        Ok(menus.into_iter().map(Menu::from_entity).collect())
    }

    /// Available menus across the given cafes, ordered by name.
    pub async fn list_available_in_cafes(&self, cafe_ids: Vec<String>) -> Result<Vec<Menu>, DbErr> {
        if cafe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let menus = entity::prelude::Menu::find()
            .filter(entity::menu::Column::CafeId.is_in(cafe_ids))
            .filter(entity::menu::Column::DeletedAt.is_null())
            .filter(entity::menu::Column::IsAvailable.eq(true))
            .order_by_asc(entity::menu::Column::Name)
            .all(self.db)
            .await?;

        Ok(menus.into_iter().map(Menu::from_entity).collect())
    }

    /// Case-insensitive substring search over name, description and category of available items.
    pub async fn search(&self, term: &str, cafe_id: Option<&str>) -> Result<Vec<Menu>, DbErr> {
        let mut query = entity::prelude::Menu::find()
            .filter(entity::menu::Column::DeletedAt.is_null())
            .filter(entity::menu::Column::IsAvailable.eq(true))
            .filter(
                Condition::any()
                    .add(entity::menu::Column::Name.contains(term))
                    .add(entity::menu::Column::Description.contains(term))
                    .add(entity::menu::Column::Category.contains(term)),
            );

        if let Some(cafe_id) = cafe_id.filter(|c| !c.is_empty()) {
            query = query.filter(entity::menu::Column::CafeId.eq(cafe_id));
        }

        let menus = query
            .order_by_asc(entity::menu::Column::Name)
            .all(self.db)
            .await?;

        Ok(menus.into_iter().map(Menu::from_entity).collect())
    }

    pub async fn update(&self, id: &str, params: UpdateMenuParams) -> Result<Option<Menu>, DbErr> {
        let Some(menu) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: entity::menu::ActiveModel = menu.into();
        if let Some(v) = params.name {
            active.name = ActiveValue::Set(v);
        }
        if let Some(v) = params.category {
            active.category = ActiveValue::Set(v);
        }
        if let Some(v) = params.price {
            active.price = ActiveValue::Set(v);
        }
        if let Some(v) = params.description {
            active.description = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.image_url {
            active.image_url = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.is_available {
            active.is_available = ActiveValue::Set(v);
        }
        if let Some(v) = params.ingredients {
            active.ingredients = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.prep_time {
            active.prep_time = ActiveValue::Set(v);
        }
        if let Some(v) = params.calories {
            active.calories = ActiveValue::Set(v);
        }
        if let Some(v) = params.allergens {
            active.allergens = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.is_popular {
            active.is_popular = ActiveValue::Set(v);
        }
        if let Some(v) = params.is_recommended {
            active.is_recommended = ActiveValue::Set(v);
        }
        if let Some(v) = params.customizable {
            active.customizable = ActiveValue::Set(v);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Menu::from_entity(active.update(self.db).await?)))
    }

    /// Soft deletes a menu item and marks it unavailable.
    pub async fn soft_delete(&self, id: &str) -> Result<bool, DbErr> {
        let Some(menu) = self.find_model(id).await? else {
            return Ok(false);
        };

        let now = Utc::now();
        let mut active: entity::menu::ActiveModel = menu.into();
        active.is_available = ActiveValue::Set(false);
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await?;

        Ok(true)
    }

    async fn find_model(&self, id: &str) -> Result<Option<entity::menu::Model>, DbErr> {
        entity::prelude::Menu::find_by_id(id.to_string())
            .filter(entity::menu::Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }
}
