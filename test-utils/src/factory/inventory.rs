//! Inventory factory for creating test stock items.

use crate::factory::helpers::{new_uuid, next_id};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating test inventory items.
///
/// # Example
///
/// ```rust,ignore
/// let beans = InventoryFactory::new(&db, &cafe.id)
///     .name("Coffee Beans")
///     .stock(10.0, 5.0, 50.0)
///     .build()
///     .await?;
/// ```
pub struct InventoryFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    cafe_id: String,
    name: String,
    category: String,
    unit: String,
    current_stock: f64,
    min_stock_level: f64,
    max_stock_level: f64,
    unit_cost: f64,
    location: Option<String>,
    expiry_date: Option<DateTime<Utc>>,
    is_active: bool,
}

impl<'a, C: ConnectionTrait> InventoryFactory<'a, C> {
    /// Creates a new InventoryFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Item {id}"`
    /// - category: `"raw_material"`, unit `"kg"`
    /// - stock: 20 current, 5 minimum, 50 maximum
    /// - unit_cost: `1000.0`
    pub fn new(db: &'a C, cafe_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            cafe_id: cafe_id.into(),
            name: format!("Item {}", id),
            category: "raw_material".to_string(),
            unit: "kg".to_string(),
            current_stock: 20.0,
            min_stock_level: 5.0,
            max_stock_level: 50.0,
            unit_cost: 1000.0,
            location: None,
            expiry_date: None,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets current, minimum and maximum stock levels.
    pub fn stock(mut self, current: f64, min: f64, max: f64) -> Self {
        self.current_stock = current;
        self.min_stock_level = min;
        self.max_stock_level = max;
        self
    }

    pub fn unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn expiry_date(mut self, expiry_date: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the inventory entity into the database.
    pub async fn build(self) -> Result<entity::inventory::Model, DbErr> {
        let now = Utc::now();
        entity::inventory::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            cafe_id: ActiveValue::Set(self.cafe_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            category: ActiveValue::Set(self.category),
            unit: ActiveValue::Set(self.unit),
            current_stock: ActiveValue::Set(self.current_stock),
            min_stock_level: ActiveValue::Set(self.min_stock_level),
            max_stock_level: ActiveValue::Set(self.max_stock_level),
            unit_cost: ActiveValue::Set(self.unit_cost),
            supplier: ActiveValue::Set(None),
            supplier_contact: ActiveValue::Set(None),
            last_restocked: ActiveValue::Set(None),
            expiry_date: ActiveValue::Set(self.expiry_date),
            location: ActiveValue::Set(self.location),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an inventory item with default stock levels in the given cafe.
pub async fn create_inventory<C: ConnectionTrait>(
    db: &C,
    cafe_id: &str,
) -> Result<entity::inventory::Model, DbErr> {
    InventoryFactory::new(db, cafe_id).build().await
}
