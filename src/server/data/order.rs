use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::{
    analytics::SoldItem,
    order::{CreateOrderParams, Order, OrderFilter, OrderItem, OrderStatus, PricedLine},
    page::{PageRequest, Paginated},
};

pub const PAYMENT_STATUS_PENDING: &str = "pending";

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an order and its items.
    ///
    /// The subtotal and total are both the sum of line totals; tax, service charge and
    /// delivery fee are recorded as zero. Call inside a transaction so a failed item insert
    /// leaves no partial order behind.
    pub async fn create(
        &self,
        params: &CreateOrderParams,
        cafe_id: &str,
        order_number: String,
        lines: Vec<PricedLine>,
    ) -> Result<Order, DbErr> {
        let now = Utc::now();
        let total: f64 = lines.iter().map(PricedLine::total_price).sum();

        let order = entity::order::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            cafe_id: ActiveValue::Set(cafe_id.to_string()),
            user_id: ActiveValue::Set(params.user_id.clone()),
            order_number: ActiveValue::Set(order_number),
            status: ActiveValue::Set(OrderStatus::Pending.as_str().to_string()),
            total_amount: ActiveValue::Set(total),
            subtotal_amount: ActiveValue::Set(total),
            tax_amount: ActiveValue::Set(0.0),
            service_charge: ActiveValue::Set(0.0),
            delivery_fee: ActiveValue::Set(0.0),
            payment_method: ActiveValue::Set(params.payment_method.as_str().to_string()),
            payment_status: ActiveValue::Set(PAYMENT_STATUS_PENDING.to_string()),
            payment_id: ActiveValue::Set(None),
            customer_name: ActiveValue::Set(params.customer_name.clone()),
            customer_phone: ActiveValue::Set(params.customer_phone.clone()),
            order_type: ActiveValue::Set(params.order_type.as_str().to_string()),
            table_number: ActiveValue::Set(params.table_number.clone()),
            delivery_address: ActiveValue::Set(params.delivery_address.clone()),
            notes: ActiveValue::Set(params.notes.clone()),
            completed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let total_price = line.total_price();
            let item = entity::order_item::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                order_id: ActiveValue::Set(order.id.clone()),
                menu_id: ActiveValue::Set(line.menu.id.clone()),
                quantity: ActiveValue::Set(line.quantity),
                unit_price: ActiveValue::Set(line.menu.price),
                total_price: ActiveValue::Set(total_price),
                notes: ActiveValue::Set(line.notes),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(self.db)
            .await?;

            let mut item = OrderItem::from_entity(item, None);
            item.menu = Some(line.menu);
            items.push(item);
        }

        Ok(Order::from_entity(order, items))
    }

    /// Finds an order with its items and their menus.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DbErr> {
        let Some(order) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut orders = self.with_items(vec![order]).await?;
        Ok(orders.pop())
    }

    /// Finds the bare order row.
    pub async fn find_model(&self, id: &str) -> Result<Option<entity::order::Model>, DbErr> {
        entity::prelude::Order::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    /// Lists orders newest first, with items.
    pub async fn list(
        &self,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Paginated<Order>, DbErr> {
        let mut query = entity::prelude::Order::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::order::Column::UserId.eq(user_id));
        }
        if let Some(cafe_id) = filter.cafe_id {
            query = query.filter(entity::order::Column::CafeId.eq(cafe_id));
        }
        if let Some(status) = filter.status.filter(|s| !s.is_empty()) {
            query = query.filter(entity::order::Column::Status.eq(status));
        }

        let paginator = query
            .order_by_desc(entity::order::Column::CreatedAt)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.index()).await?;
        let orders = self.with_items(orders).await?;

        Ok(Paginated::new(orders, total, page))
    }

    /// Sets the order status, stamping `completed_at` when it becomes completed.
    pub async fn update_status(
        &self,
        order: entity::order::Model,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<entity::order::Model, DbErr> {
        let mut active: entity::order::ActiveModel = order.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        if status == OrderStatus::Completed {
            active.completed_at = ActiveValue::Set(Some(now));
        }
        active.updated_at = ActiveValue::Set(now);

        active.update(self.db).await
    }

    /// Links a payment to the order and records the chosen method.
    pub async fn attach_payment(
        &self,
        order: entity::order::Model,
        method: &str,
        payment_id: &str,
    ) -> Result<entity::order::Model, DbErr> {
        let mut active: entity::order::ActiveModel = order.into();
        active.payment_method = ActiveValue::Set(method.to_string());
        active.payment_id = ActiveValue::Set(Some(payment_id.to_string()));
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn set_payment_status(
        &self,
        order: entity::order::Model,
        payment_status: &str,
    ) -> Result<entity::order::Model, DbErr> {
        let mut active: entity::order::ActiveModel = order.into();
        active.payment_status = ActiveValue::Set(payment_status.to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    /// Orders created in `[from, before)`, optionally restricted to one cafe.
    pub async fn list_created_between(
        &self,
        cafe_id: Option<&str>,
        from: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<Vec<entity::order::Model>, DbErr> {
        let mut query = entity::prelude::Order::find()
            .filter(entity::order::Column::CreatedAt.gte(from))
            .filter(entity::order::Column::CreatedAt.lt(before));
        if let Some(cafe_id) = cafe_id {
            query = query.filter(entity::order::Column::CafeId.eq(cafe_id));
        }

        query
            .order_by_asc(entity::order::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Line items of the given orders joined with their menu names.
    pub async fn sold_items(&self, order_ids: Vec<String>) -> Result<Vec<SoldItem>, DbErr> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.is_in(order_ids))
            .all(self.db)
            .await?;

        let menu_ids: Vec<String> = items.iter().map(|i| i.menu_id.clone()).collect();
        let names: HashMap<String, String> = entity::prelude::Menu::find()
            .filter(entity::menu::Column::Id.is_in(menu_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        Ok(items
            .into_iter()
            .map(|item| SoldItem {
                menu_name: names
                    .get(&item.menu_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown item".to_string()),
                menu_id: item.menu_id,
                quantity: item.quantity,
                total_price: item.total_price,
            })
            .collect())
    }

    async fn with_items(&self, orders: Vec<entity::order::Model>) -> Result<Vec<Order>, DbErr> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
        let items = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.is_in(order_ids))
            .order_by_asc(entity::order_item::Column::CreatedAt)
            .all(self.db)
            .await?;

        let menu_ids: Vec<String> = items.iter().map(|i| i.menu_id.clone()).collect();
        let menus: HashMap<String, entity::menu::Model> = if menu_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Menu::find()
                .filter(entity::menu::Column::Id.is_in(menu_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|m| (m.id.clone(), m))
                .collect()
        };

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for item in items {
            let menu = menus.get(&item.menu_id).cloned();
            items_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(OrderItem::from_entity(item, menu));
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                Order::from_entity(order, items)
            })
            .collect())
    }
}
