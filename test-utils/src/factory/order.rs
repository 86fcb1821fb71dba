//! Order factory for creating test orders and their line items.

use crate::factory::helpers::{new_uuid, next_id};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for creating test orders.
///
/// Line items are added with `item()`; the order totals are derived from them unless
/// `total()` overrides it.
///
/// # Example
///
/// ```rust,ignore
/// let (order, items) = OrderFactory::new(&db, &cafe.id, &customer.id)
///     .item(&menu, 2)
///     .status("completed")
///     .build()
///     .await?;
/// ```
pub struct OrderFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    cafe_id: String,
    user_id: String,
    order_number: String,
    status: String,
    payment_method: String,
    payment_status: String,
    order_type: String,
    items: Vec<(String, i32, f64)>,
    total: Option<f64>,
    created_at: DateTime<Utc>,
}

impl<'a, C: ConnectionTrait> OrderFactory<'a, C> {
    /// Creates a new OrderFactory for a pending cash dine-in order with no items.
    pub fn new(db: &'a C, cafe_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            cafe_id: cafe_id.into(),
            user_id: user_id.into(),
            order_number: format!("ORD-TEST-{:08}", id),
            status: "pending".to_string(),
            payment_method: "cash".to_string(),
            payment_status: "pending".to_string(),
            order_type: "dine_in".to_string(),
            items: Vec::new(),
            total: None,
            created_at: Utc::now(),
        }
    }

    /// Adds a line item for `quantity` units of `menu` at its current price.
    pub fn item(mut self, menu: &entity::menu::Model, quantity: i32) -> Self {
        self.items.push((menu.id.clone(), quantity, menu.price));
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }

    pub fn payment_status(mut self, payment_status: impl Into<String>) -> Self {
        self.payment_status = payment_status.into();
        self
    }

    /// Overrides the order total instead of summing the line items.
    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the order followed by its line items.
    ///
    /// # Returns
    /// - `Ok((order, items))` - The created order and its items
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(
        self,
    ) -> Result<(entity::order::Model, Vec<entity::order_item::Model>), DbErr> {
        let subtotal: f64 = self
            .items
            .iter()
            .map(|(_, quantity, price)| *quantity as f64 * price)
            .sum();
        let total = self.total.unwrap_or(subtotal);
        let order_id = new_uuid();

        let order = entity::order::ActiveModel {
            id: ActiveValue::Set(order_id.clone()),
            cafe_id: ActiveValue::Set(self.cafe_id),
            user_id: ActiveValue::Set(self.user_id),
            order_number: ActiveValue::Set(self.order_number),
            status: ActiveValue::Set(self.status),
            total_amount: ActiveValue::Set(total),
            subtotal_amount: ActiveValue::Set(total),
            tax_amount: ActiveValue::Set(0.0),
            service_charge: ActiveValue::Set(0.0),
            delivery_fee: ActiveValue::Set(0.0),
            payment_method: ActiveValue::Set(self.payment_method),
            payment_status: ActiveValue::Set(self.payment_status),
            payment_id: ActiveValue::Set(None),
            customer_name: ActiveValue::Set("Test Customer".to_string()),
            customer_phone: ActiveValue::Set(None),
            order_type: ActiveValue::Set(self.order_type),
            table_number: ActiveValue::Set(None),
            delivery_address: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            completed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await?;

        let mut items = Vec::with_capacity(self.items.len());
        for (menu_id, quantity, unit_price) in self.items {
            let item = entity::order_item::ActiveModel {
                id: ActiveValue::Set(new_uuid()),
                order_id: ActiveValue::Set(order_id.clone()),
                menu_id: ActiveValue::Set(menu_id),
                quantity: ActiveValue::Set(quantity),
                unit_price: ActiveValue::Set(unit_price),
                total_price: ActiveValue::Set(quantity as f64 * unit_price),
                notes: ActiveValue::Set(None),
                created_at: ActiveValue::Set(self.created_at),
                updated_at: ActiveValue::Set(self.created_at),
            }
            .insert(self.db)
            .await?;
            items.push(item);
        }

        Ok((order, items))
    }
}
