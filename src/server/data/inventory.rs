use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use entity::inventory::Column;

use crate::server::model::{
    inventory::{
        CreateInventoryParams, InventoryFilter, InventoryItem, StockStatus, UpdateInventoryParams,
    },
    page::{PageRequest, Paginated},
};

pub struct InventoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InventoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateInventoryParams) -> Result<InventoryItem, DbErr> {
        let now = Utc::now();
        let item = entity::inventory::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            cafe_id: ActiveValue::Set(params.cafe_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            unit: ActiveValue::Set(params.unit),
            current_stock: ActiveValue::Set(params.current_stock),
            min_stock_level: ActiveValue::Set(params.min_stock_level),
            max_stock_level: ActiveValue::Set(params.max_stock_level),
            unit_cost: ActiveValue::Set(params.unit_cost),
            supplier: ActiveValue::Set(params.supplier),
            supplier_contact: ActiveValue::Set(params.supplier_contact),
            last_restocked: ActiveValue::Set(None),
            expiry_date: ActiveValue::Set(params.expiry_date),
            location: ActiveValue::Set(params.location),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(InventoryItem::from_entity(item))
    }

    /// Finds a non-deleted item belonging to the cafe.
    pub async fn find_in_cafe(
        &self,
        id: &str,
        cafe_id: &str,
    ) -> Result<Option<InventoryItem>, DbErr> {
        Ok(self
            .find_model(id, cafe_id)
            .await?
            .map(InventoryItem::from_entity))
    }

    /// Lists the cafe's items ordered by name.
    pub async fn list(
        &self,
        cafe_id: &str,
        filter: InventoryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InventoryItem>, DbErr> {
        let mut query = entity::prelude::Inventory::find()
            .filter(Column::CafeId.eq(cafe_id))
            .filter(Column::DeletedAt.is_null());

        if let Some(category) = filter.category.filter(|c| !c.is_empty()) {
            query = query.filter(Column::Category.eq(category));
        }
        if let Some(location) = filter.location.filter(|l| !l.is_empty()) {
            query = query.filter(Column::Location.eq(location));
        }
        if let Some(status) = filter.status {
            query = query.filter(stock_status_condition(status));
        }

        let paginator = query
            .order_by_asc(Column::Name)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(InventoryItem::from_entity)
            .collect();

        Ok(Paginated::new(items, total, page))
    }

    pub async fn update(
        &self,
        id: &str,
        cafe_id: &str,
        params: UpdateInventoryParams,
    ) -> Result<Option<InventoryItem>, DbErr> {
        let Some(item) = self.find_model(id, cafe_id).await? else {
            return Ok(None);
        };

        let mut active: entity::inventory::ActiveModel = item.into();
        if let Some(v) = params.name {
            active.name = ActiveValue::Set(v);
        }
        if let Some(v) = params.category {
            active.category = ActiveValue::Set(v);
        }
        if let Some(v) = params.unit {
            active.unit = ActiveValue::Set(v);
        }
        if let Some(v) = params.current_stock {
            active.current_stock = ActiveValue::Set(v);
        }
        if let Some(v) = params.min_stock_level {
            active.min_stock_level = ActiveValue::Set(v);
        }
        if let Some(v) = params.max_stock_level {
            active.max_stock_level = ActiveValue::Set(v);
        }
        if let Some(v) = params.unit_cost {
            active.unit_cost = ActiveValue::Set(v);
        }
        if let Some(v) = params.description {
            active.description = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.supplier {
            active.supplier = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.supplier_contact {
            active.supplier_contact = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.location {
            active.location = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.expiry_date {
            active.expiry_date = ActiveValue::Set(Some(v));
        }
        if let Some(v) = params.is_active {
            active.is_active = ActiveValue::Set(v);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(InventoryItem::from_entity(active.update(self.db).await?)))
    }

    pub async fn soft_delete(&self, id: &str, cafe_id: &str) -> Result<bool, DbErr> {
        let Some(item) = self.find_model(id, cafe_id).await? else {
            return Ok(false);
        };

        let now = Utc::now();
        let mut active: entity::inventory::ActiveModel = item.into();
        active.deleted_at = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await?;

        Ok(true)
    }

    /// Writes a new stock balance after a movement.
    ///
    /// Restocks also stamp `last_restocked` and, when given, replace the unit cost.
    pub async fn set_stock(
        &self,
        id: &str,
        cafe_id: &str,
        balance: f64,
        is_restock: bool,
        unit_cost: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<InventoryItem, DbErr> {
        let Some(item) = self.find_model(id, cafe_id).await? else {
            return Err(DbErr::RecordNotFound(format!("Inventory item {} not found", id)));
        };

        let mut active: entity::inventory::ActiveModel = item.into();
        active.current_stock = ActiveValue::Set(balance);
        if is_restock {
            active.last_restocked = ActiveValue::Set(Some(now));
            if let Some(cost) = unit_cost.filter(|c| *c > 0.0) {
                active.unit_cost = ActiveValue::Set(cost);
            }
        }
        active.updated_at = ActiveValue::Set(now);

        Ok(InventoryItem::from_entity(active.update(self.db).await?))
    }

    /// Active items at or below their minimum level, ordered by name.
    pub async fn low_stock(&self, cafe_id: &str) -> Result<Vec<InventoryItem>, DbErr> {
        let items = entity::prelude::Inventory::find()
            .filter(Column::CafeId.eq(cafe_id))
            .filter(Column::DeletedAt.is_null())
            .filter(Column::IsActive.eq(true))
            .filter(stock_status_condition(StockStatus::Low))
            .order_by_asc(Column::Name)
            .all(self.db)
            .await?;

        Ok(items.into_iter().map(InventoryItem::from_entity).collect())
    }

    /// Active items expiring within `[from, until]`, soonest first.
    pub async fn expiring_between(
        &self,
        cafe_id: &str,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<InventoryItem>, DbErr> {
        let items = entity::prelude::Inventory::find()
            .filter(Column::CafeId.eq(cafe_id))
            .filter(Column::DeletedAt.is_null())
            .filter(Column::IsActive.eq(true))
            .filter(Column::ExpiryDate.is_not_null())
            .filter(Column::ExpiryDate.gte(from))
            .filter(Column::ExpiryDate.lte(until))
            .order_by_asc(Column::ExpiryDate)
            .all(self.db)
            .await?;

        Ok(items.into_iter().map(InventoryItem::from_entity).collect())
    }

    async fn find_model(
        &self,
        id: &str,
        cafe_id: &str,
    ) -> Result<Option<entity::inventory::Model>, DbErr> {
        entity::prelude::Inventory::find_by_id(id.to_string())
            .filter(Column::CafeId.eq(cafe_id))
            .filter(Column::DeletedAt.is_null())
            .one(self.db)
            .await
    }
}

/// SQL condition matching `StockStatus::classify`.
fn stock_status_condition(status: StockStatus) -> Condition {
    let at_or_below_min = Expr::col(Column::CurrentStock).lte(Expr::col(Column::MinStockLevel));
    let above_min = Expr::col(Column::CurrentStock).gt(Expr::col(Column::MinStockLevel));
    let at_or_above_max = Condition::all()
        .add(Column::MaxStockLevel.gt(0.0))
        .add(Expr::col(Column::CurrentStock).gte(Expr::col(Column::MaxStockLevel)));

    match status {
        StockStatus::Low => Condition::all().add(at_or_below_min),
        StockStatus::Overstock => Condition::all().add(above_min).add(at_or_above_max),
        StockStatus::Optimal => Condition::all()
            .add(above_min)
            .add(at_or_above_max.not()),
    }
}
