use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::menu::MenuDto;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OrderItemDto {
    pub id: String,
    pub menu_id: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
    pub notes: Option<String>,
    pub menu: Option<MenuDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OrderDto {
    pub id: String,
    pub cafe_id: String,
    pub user_id: String,
    pub order_number: String,
    pub status: String,
    pub total_amount: f64,
    pub subtotal_amount: f64,
    pub tax_amount: f64,
    pub service_charge: f64,
    pub delivery_fee: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub order_type: String,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateOrderItemDto {
    pub menu_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateOrderDto {
    pub items: Vec<CreateOrderItemDto>,
    /// dine_in, take_away or delivery
    pub order_type: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    /// crypto, cash or transfer
    pub payment_method: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateOrderStatusDto {
    pub status: String,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReceiptQuery {
    /// `full` (default) or `mini`
    pub format: Option<String>,
}
