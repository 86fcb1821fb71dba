//! Inventory of the owner's cafe: items, stock movements and reports.

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::inventory::{CreateInventoryDto, CreateStockMovementDto},
    server::{
        data::{inventory::InventoryRepository, stock_movement::StockMovementRepository},
        error::AppError,
        model::{
            cafe::Cafe,
            inventory::{
                validate_stock_levels, CreateInventoryParams, InventoryFilter, InventoryItem,
                MovementType, RecordMovementParams, StockMovement, UpdateInventoryParams,
                MAX_EXPIRY_WINDOW_DAYS,
            },
            page::{PageRequest, Paginated},
            user::User,
        },
        service::cafe::CafeService,
    },
};

pub struct InventoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InventoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        owner_id: &str,
        filter: InventoryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InventoryItem>, AppError> {
        let cafe = self.cafe(owner_id).await?;

        Ok(InventoryRepository::new(self.db)
            .list(&cafe.id, filter, page)
            .await?)
    }

    pub async fn create(
        &self,
        owner_id: &str,
        dto: CreateInventoryDto,
    ) -> Result<InventoryItem, AppError> {
        let cafe = self.cafe(owner_id).await?;
        let params = CreateInventoryParams::from_dto(cafe.id, dto).map_err(AppError::BadRequest)?;

        let item = InventoryRepository::new(self.db).create(params).await?;
        tracing::info!("Inventory item {} added to cafe {}", item.name, item.cafe_id);

        Ok(item)
    }

    /// Applies a partial update, validating the resulting stock levels as a whole.
    pub async fn update(
        &self,
        owner_id: &str,
        id: &str,
        params: UpdateInventoryParams,
    ) -> Result<InventoryItem, AppError> {
        let cafe = self.cafe(owner_id).await?;
        let repo = InventoryRepository::new(self.db);

        let current = repo
            .find_in_cafe(id, &cafe.id)
            .await?
            .ok_or_else(not_found)?;

        for (field, value) in [
            ("Name", &params.name),
            ("Category", &params.category),
            ("Unit", &params.unit),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::BadRequest(format!("{} cannot be empty", field)));
            }
        }
        validate_stock_levels(
            params.current_stock.unwrap_or(current.current_stock),
            params.min_stock_level.unwrap_or(current.min_stock_level),
            params.max_stock_level.unwrap_or(current.max_stock_level),
        )
        .map_err(AppError::BadRequest)?;
        if params.unit_cost.is_some_and(|c| c < 0.0) {
            return Err(AppError::BadRequest(
                "Unit cost cannot be negative".to_string(),
            ));
        }

        repo.update(id, &cafe.id, params)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError> {
        let cafe = self.cafe(owner_id).await?;

        if !InventoryRepository::new(self.db)
            .soft_delete(id, &cafe.id)
            .await?
        {
            return Err(not_found());
        }

        Ok(())
    }

    /// Records a stock movement and writes the resulting balance.
    ///
    /// `in` adds to stock; `out`, `adjustment` and `waste` subtract. The balance update
    /// and the movement row share one transaction, and a movement that would take stock
    /// below zero writes nothing.
    ///
    /// # Returns
    /// - `Ok((StockMovement, InventoryItem))` - Recorded movement and the updated item
    /// - `Err(AppError::BadRequest)` - Unknown type, non-positive quantity, missing reason,
    ///   or insufficient stock
    /// - `Err(AppError::NotFound)` - Owner has no cafe or the item is not in it
    pub async fn record_movement(
        &self,
        owner: &User,
        id: &str,
        dto: CreateStockMovementDto,
    ) -> Result<(StockMovement, InventoryItem), AppError> {
        let movement_type = MovementType::parse(&dto.movement_type).ok_or_else(|| {
            AppError::BadRequest(
                "Movement type must be in, out, adjustment or waste".to_string(),
            )
        })?;
        if dto.quantity <= 0.0 {
            return Err(AppError::BadRequest(
                "Quantity must be greater than zero".to_string(),
            ));
        }
        if dto.reason.trim().is_empty() {
            return Err(AppError::BadRequest("Reason is required".to_string()));
        }
        if dto.unit_cost.is_some_and(|c| c < 0.0) {
            return Err(AppError::BadRequest(
                "Unit cost cannot be negative".to_string(),
            ));
        }

        let cafe = self.cafe(&owner.id).await?;

        let txn = self.db.begin().await?;
        let item_repo = InventoryRepository::new(&txn);

        let item = item_repo
            .find_in_cafe(id, &cafe.id)
            .await?
            .ok_or_else(not_found)?;

        let balance = movement_type.apply(item.current_stock, dto.quantity);
        if balance < 0.0 {
            return Err(AppError::BadRequest("Insufficient stock".to_string()));
        }

        let now = Utc::now();
        let is_restock = movement_type == MovementType::In;
        let item = item_repo
            .set_stock(&item.id, &cafe.id, balance, is_restock, dto.unit_cost, now)
            .await?;

        let unit_cost = dto.unit_cost.unwrap_or(item.unit_cost);
        let params = RecordMovementParams {
            inventory_id: item.id.clone(),
            cafe_id: cafe.id,
            movement_type,
            quantity: dto.quantity,
            unit_cost: dto.unit_cost,
            reason: dto.reason.trim().to_string(),
            reference_id: dto.reference_id,
            notes: dto.notes,
            performed_by: owner.id.clone(),
        };
        let movement = StockMovementRepository::new(&txn)
            .create(params, unit_cost, balance, now)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Stock movement {} of {} on {}, balance now {}",
            movement_type.as_str(),
            dto.quantity,
            item.name,
            balance
        );

        let movement =
            StockMovement::from_entity(movement, Some(item.name.clone()), Some(owner.name.clone()));

        Ok((movement, item))
    }

    pub async fn movements(
        &self,
        owner_id: &str,
        id: &str,
        page: PageRequest,
    ) -> Result<Paginated<StockMovement>, AppError> {
        let cafe = self.cafe(owner_id).await?;
        let item = InventoryRepository::new(self.db)
            .find_in_cafe(id, &cafe.id)
            .await?
            .ok_or_else(not_found)?;

        Ok(StockMovementRepository::new(self.db)
            .list_for_item(&item.id, page)
            .await?)
    }

    pub async fn low_stock(&self, owner_id: &str) -> Result<Vec<InventoryItem>, AppError> {
        let cafe = self.cafe(owner_id).await?;

        Ok(InventoryRepository::new(self.db).low_stock(&cafe.id).await?)
    }

    /// Active items expiring between now and `days` from now, soonest first.
    ///
    /// `days` must lie within `1..=MAX_EXPIRY_WINDOW_DAYS`.
    pub async fn expiring(&self, owner_id: &str, days: i64) -> Result<Vec<InventoryItem>, AppError> {
        if !(1..=MAX_EXPIRY_WINDOW_DAYS).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "Days must be between 1 and {}",
                MAX_EXPIRY_WINDOW_DAYS
            )));
        }
        let cafe = self.cafe(owner_id).await?;
        let now = Utc::now();

        Ok(InventoryRepository::new(self.db)
            .expiring_between(&cafe.id, now, now + Duration::days(days))
            .await?)
    }

    async fn cafe(&self, owner_id: &str) -> Result<Cafe, AppError> {
        CafeService::new(self.db).owned(owner_id).await
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Inventory item not found".to_string())
}
