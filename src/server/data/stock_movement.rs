use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::{
    inventory::{RecordMovementParams, StockMovement},
    page::{PageRequest, Paginated},
};

pub struct StockMovementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StockMovementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a movement row with the resulting balance and cost.
    pub async fn create(
        &self,
        params: RecordMovementParams,
        unit_cost: f64,
        balance_after: f64,
        now: DateTime<Utc>,
    ) -> Result<entity::stock_movement::Model, DbErr> {
        entity::stock_movement::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            inventory_id: ActiveValue::Set(params.inventory_id),
            cafe_id: ActiveValue::Set(params.cafe_id),
            movement_type: ActiveValue::Set(params.movement_type.as_str().to_string()),
            quantity: ActiveValue::Set(params.quantity),
            unit_cost: ActiveValue::Set(unit_cost),
            total_cost: ActiveValue::Set(params.quantity * unit_cost),
            balance_after: ActiveValue::Set(balance_after),
            reason: ActiveValue::Set(params.reason),
            reference_id: ActiveValue::Set(params.reference_id),
            notes: ActiveValue::Set(params.notes),
            performed_by: ActiveValue::Set(params.performed_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    /// Movements of one item, newest first, with item and performer names.
    pub async fn list_for_item(
        &self,
        inventory_id: &str,
        page: PageRequest,
    ) -> Result<Paginated<StockMovement>, DbErr> {
        let paginator = entity::prelude::StockMovement::find()
            .filter(entity::stock_movement::Column::InventoryId.eq(inventory_id))
            .order_by_desc(entity::stock_movement::Column::CreatedAt)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let movements = paginator.fetch_page(page.index()).await?;

        let inventory_name = entity::prelude::Inventory::find_by_id(inventory_id.to_string())
            .one(self.db)
            .await?
            .map(|i| i.name);

        let user_ids: Vec<String> = movements.iter().map(|m| m.performed_by.clone()).collect();
        let names: HashMap<String, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::User::find()
                .filter(entity::user::Column::Id.is_in(user_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        let movements = movements
            .into_iter()
            .map(|m| {
                let performer = names.get(&m.performed_by).cloned();
                StockMovement::from_entity(m, inventory_name.clone(), performer)
            })
            .collect();

        Ok(Paginated::new(movements, total, page))
    }
}
