//! Inventory items, stock levels and stock movements.

use chrono::{DateTime, Utc};

use crate::model::inventory::{
    CreateInventoryDto, InventoryItemDto, StockMovementDto, UpdateInventoryDto,
};

pub const DEFAULT_INVENTORY_LIMIT: u64 = 50;
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 7;
pub const MAX_EXPIRY_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Low,
    Optimal,
    Overstock,
}

impl StockStatus {
    /// Classifies a stock level. A `max` of zero means no upper bound.
    pub fn classify(current: f64, min: f64, max: f64) -> Self {
        if current <= min {
            Self::Low
        } else if max > 0.0 && current >= max {
            Self::Overstock
        } else {
            Self::Optimal
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "optimal" => Some(Self::Optimal),
            "overstock" => Some(Self::Overstock),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Optimal => "optimal",
            Self::Overstock => "overstock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementType {
    In,
    Out,
    Adjustment,
    Waste,
}

impl MovementType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "adjustment" => Some(Self::Adjustment),
            "waste" => Some(Self::Waste),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Adjustment => "adjustment",
            Self::Waste => "waste",
        }
    }

    /// Stock balance after applying `quantity` of this movement to `current`.
    pub fn apply(&self, current: f64, quantity: f64) -> f64 {
        match self {
            Self::In => current + quantity,
            Self::Out | Self::Adjustment | Self::Waste => current - quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub cafe_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit: String,
    pub current_stock: f64,
    pub min_stock_level: f64,
    pub max_stock_level: f64,
    pub unit_cost: f64,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub last_restocked: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn from_entity(entity: entity::inventory::Model) -> Self {
        Self {
            id: entity.id,
            cafe_id: entity.cafe_id,
            name: entity.name,
            description: entity.description,
            category: entity.category,
            unit: entity.unit,
            current_stock: entity.current_stock,
            min_stock_level: entity.min_stock_level,
            max_stock_level: entity.max_stock_level,
            unit_cost: entity.unit_cost,
            supplier: entity.supplier,
            supplier_contact: entity.supplier_contact,
            last_restocked: entity.last_restocked,
            expiry_date: entity.expiry_date,
            location: entity.location,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.min_stock_level, self.max_stock_level)
    }

    pub fn into_dto(self) -> InventoryItemDto {
        let stock_status = self.stock_status().as_str().to_string();
        InventoryItemDto {
            id: self.id,
            cafe_id: self.cafe_id,
            name: self.name,
            description: self.description,
            category: self.category,
            unit: self.unit,
            current_stock: self.current_stock,
            min_stock_level: self.min_stock_level,
            max_stock_level: self.max_stock_level,
            unit_cost: self.unit_cost,
            supplier: self.supplier,
            supplier_contact: self.supplier_contact,
            last_restocked: self.last_restocked,
            expiry_date: self.expiry_date,
            location: self.location,
            is_active: self.is_active,
            stock_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Checks stock levels are non-negative and `max` is either unbounded (0) or at least `min`.
pub fn validate_stock_levels(current: f64, min: f64, max: f64) -> Result<(), String> {
    if current < 0.0 || min < 0.0 || max < 0.0 {
        return Err("Stock levels cannot be negative".to_string());
    }
    if max > 0.0 && max < min {
        return Err("Maximum stock level must be greater than minimum stock level".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<StockStatus>,
}

#[derive(Debug, Clone)]
pub struct CreateInventoryParams {
    pub cafe_id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub current_stock: f64,
    pub min_stock_level: f64,
    pub max_stock_level: f64,
    pub unit_cost: f64,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub location: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl CreateInventoryParams {
    pub fn from_dto(cafe_id: String, dto: CreateInventoryDto) -> Result<Self, String> {
        let name = dto.name.trim().to_string();
        let category = dto.category.trim().to_string();
        let unit = dto.unit.trim().to_string();
        if name.is_empty() || category.is_empty() || unit.is_empty() {
            return Err("Name, category and unit are required".to_string());
        }

        let params = Self {
            cafe_id,
            name,
            category,
            unit,
            current_stock: dto.current_stock.unwrap_or_default(),
            min_stock_level: dto.min_stock_level.unwrap_or_default(),
            max_stock_level: dto.max_stock_level.unwrap_or_default(),
            unit_cost: dto.unit_cost.unwrap_or_default(),
            description: dto.description,
            supplier: dto.supplier,
            supplier_contact: dto.supplier_contact,
            location: dto.location,
            expiry_date: dto.expiry_date,
        };
        validate_stock_levels(
            params.current_stock,
            params.min_stock_level,
            params.max_stock_level,
        )?;
        if params.unit_cost < 0.0 {
            return Err("Unit cost cannot be negative".to_string());
        }

        Ok(params)
    }
}

/// Partial inventory update. `None` leaves a field unchanged.
pub type UpdateInventoryParams = UpdateInventoryDto;

#[derive(Debug, Clone, PartialEq)]
pub struct StockMovement {
    pub id: String,
    pub inventory_id: String,
    pub inventory_name: Option<String>,
    pub movement_type: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub balance_after: f64,
    pub reason: String,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
    pub performed_by: String,
    pub performed_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn from_entity(
        entity: entity::stock_movement::Model,
        inventory_name: Option<String>,
        performed_by_name: Option<String>,
    ) -> Self {
        Self {
            id: entity.id,
            inventory_id: entity.inventory_id,
            inventory_name,
            movement_type: entity.movement_type,
            quantity: entity.quantity,
            unit_cost: entity.unit_cost,
            total_cost: entity.total_cost,
            balance_after: entity.balance_after,
            reason: entity.reason,
            reference_id: entity.reference_id,
            notes: entity.notes,
            performed_by: entity.performed_by,
            performed_by_name,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> StockMovementDto {
        StockMovementDto {
            id: self.id,
            inventory_id: self.inventory_id,
            inventory_name: self.inventory_name,
            movement_type: self.movement_type,
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            total_cost: self.total_cost,
            balance_after: self.balance_after,
            reason: self.reason,
            reference_id: self.reference_id,
            notes: self.notes,
            performed_by: self.performed_by,
            performed_by_name: self.performed_by_name,
            created_at: self.created_at,
        }
    }
}

/// A stock movement to be recorded against one item.
#[derive(Debug, Clone)]
pub struct RecordMovementParams {
    pub inventory_id: String,
    pub cafe_id: String,
    pub movement_type: MovementType,
    pub quantity: f64,
    pub unit_cost: Option<f64>,
    pub reason: String,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
    pub performed_by: String,
}
