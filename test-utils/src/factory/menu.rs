//! Menu factory for creating test menu items.

use crate::factory::helpers::{new_uuid, next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating test menu items with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let menu = MenuFactory::new(&db, &cafe.id)
///     .name("Cappuccino")
///     .category("coffee")
///     .price(25000.0)
///     .build()
///     .await?;
/// ```
pub struct MenuFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    cafe_id: String,
    name: String,
    description: Option<String>,
    category: String,
    price: f64,
    is_available: bool,
    deleted: bool,
}

impl<'a, C: ConnectionTrait> MenuFactory<'a, C> {
    /// Creates a new MenuFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Menu {id}"`
    /// - category: `"coffee"`
    /// - price: `25000.0`
    /// - is_available: `true`
    pub fn new(db: &'a C, cafe_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            cafe_id: cafe_id.into(),
            name: format!("Menu {}", id),
            description: None,
            category: "coffee".to_string(),
            price: 25000.0,
            is_available: true,
            deleted: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn is_available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Marks the menu item as soft-deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Builds and inserts the menu entity into the database.
    pub async fn build(self) -> Result<entity::menu::Model, DbErr> {
        let now = Utc::now();
        entity::menu::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            cafe_id: ActiveValue::Set(self.cafe_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            category: ActiveValue::Set(self.category),
            price: ActiveValue::Set(self.price),
            image_url: ActiveValue::Set(None),
            is_available: ActiveValue::Set(self.is_available),
            ingredients: ActiveValue::Set(None),
            prep_time: ActiveValue::Set(5),
            is_popular: ActiveValue::Set(false),
            is_recommended: ActiveValue::Set(false),
            calories: ActiveValue::Set(0),
            allergens: ActiveValue::Set(None),
            customizable: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(self.deleted.then_some(now)),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an available coffee item priced at 25000 in the given cafe.
pub async fn create_menu<C: ConnectionTrait>(
    db: &C,
    cafe_id: &str,
) -> Result<entity::menu::Model, DbErr> {
    MenuFactory::new(db, cafe_id).build().await
}
