use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct InventoryItemDto {
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
    /// low, optimal or overstock
    pub stock_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct CreateInventoryDto {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub current_stock: Option<f64>,
    pub min_stock_level: Option<f64>,
    pub max_stock_level: Option<f64>,
    pub unit_cost: Option<f64>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub location: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct UpdateInventoryDto {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub current_stock: Option<f64>,
    pub min_stock_level: Option<f64>,
    pub max_stock_level: Option<f64>,
    pub unit_cost: Option<f64>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub location: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct StockMovementDto {
    pub id: String,
    pub inventory_id: String,
    pub inventory_name: Option<String>,
    #[serde(rename = "type")]
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

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreateStockMovementDto {
    /// in, out, adjustment or waste
    #[serde(rename = "type")]
    pub movement_type: String,
    pub quantity: f64,
    pub unit_cost: Option<f64>,
    pub reason: String,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StockMovementResultDto {
    pub movement: StockMovementDto,
    pub item: InventoryItemDto,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryListQuery {
    pub page: Option<u64>,
    /// Defaults to 50
    pub limit: Option<u64>,
    pub category: Option<String>,
    pub location: Option<String>,
    /// low, optimal or overstock
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpiringQuery {
    /// Look-ahead window in days, defaults to 7
    pub days: Option<i64>,
}
