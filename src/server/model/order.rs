//! Order domain models, order enums and creation parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::order::{CreateOrderDto, OrderDto, OrderItemDto},
    server::model::menu::Menu,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "preparing" => Some(Self::Preparing),
            "ready" => Some(Self::Ready),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    DineIn,
    TakeAway,
    Delivery,
}

impl OrderType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dine_in" => Some(Self::DineIn),
            "take_away" => Some(Self::TakeAway),
            "delivery" => Some(Self::Delivery),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DineIn => "dine_in",
            Self::TakeAway => "take_away",
            Self::Delivery => "delivery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Crypto,
    Cash,
    Transfer,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "crypto" => Some(Self::Crypto),
            "cash" => Some(Self::Cash),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crypto => "crypto",
            Self::Cash => "cash",
            Self::Transfer => "transfer",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_id: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
    pub notes: Option<String>,
    /// The ordered menu, when it still exists
    pub menu: Option<Menu>,
}

impl OrderItem {
    pub fn from_entity(entity: entity::order_item::Model, menu: Option<entity::menu::Model>) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            menu_id: entity.menu_id,
            quantity: entity.quantity,
            unit_price: entity.unit_price,
            total_price: entity.total_price,
            notes: entity.notes,
            menu: menu.map(Menu::from_entity),
        }
    }

    pub fn into_dto(self) -> OrderItemDto {
        OrderItemDto {
            id: self.id,
            menu_id: self.menu_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
            notes: self.notes,
            menu: self.menu.map(Menu::into_dto),
        }
    }

    /// Display name used on receipts and summaries.
    pub fn menu_name(&self) -> &str {
        self.menu
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or("Unknown item")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
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
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn from_entity(entity: entity::order::Model, items: Vec<OrderItem>) -> Self {
        Self {
            id: entity.id,
            cafe_id: entity.cafe_id,
            user_id: entity.user_id,
            order_number: entity.order_number,
            status: entity.status,
            total_amount: entity.total_amount,
            subtotal_amount: entity.subtotal_amount,
            tax_amount: entity.tax_amount,
            service_charge: entity.service_charge,
            delivery_fee: entity.delivery_fee,
            payment_method: entity.payment_method,
            payment_status: entity.payment_status,
            payment_id: entity.payment_id,
            customer_name: entity.customer_name,
            customer_phone: entity.customer_phone,
            order_type: entity.order_type,
            table_number: entity.table_number,
            delivery_address: entity.delivery_address,
            notes: entity.notes,
            completed_at: entity.completed_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            items,
        }
    }

    pub fn into_dto(self) -> OrderDto {
        OrderDto {
            id: self.id,
            cafe_id: self.cafe_id,
            user_id: self.user_id,
            order_number: self.order_number,
            status: self.status,
            total_amount: self.total_amount,
            subtotal_amount: self.subtotal_amount,
            tax_amount: self.tax_amount,
            service_charge: self.service_charge,
            delivery_fee: self.delivery_fee,
            payment_method: self.payment_method,
            payment_status: self.payment_status,
            payment_id: self.payment_id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            order_type: self.order_type,
            table_number: self.table_number,
            delivery_address: self.delivery_address,
            notes: self.notes,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: self.items.into_iter().map(OrderItem::into_dto).collect(),
        }
    }
}

/// A requested line item before prices are resolved.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub menu_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// A line item with its menu resolved and priced at the current menu price.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub menu: Menu,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl PricedLine {
    pub fn total_price(&self) -> f64 {
        self.menu.price * f64::from(self.quantity)
    }
}

/// Which orders a listing covers.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub user_id: Option<String>,
    pub cafe_id: Option<String>,
    pub status: Option<String>,
}

/// Validated order creation input.
#[derive(Debug, Clone)]
pub struct CreateOrderParams {
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub order_type: OrderType,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub payment_method: PaymentMethod,
}

impl CreateOrderParams {
    /// Validates the request body and converts it into creation parameters.
    ///
    /// # Returns
    /// - `Ok(CreateOrderParams)` - Input is well formed
    /// - `Err(String)` - Message describing the first validation failure
    pub fn from_dto(user_id: String, dto: CreateOrderDto) -> Result<Self, String> {
        if dto.items.is_empty() {
            return Err("Order must contain at least one item".to_string());
        }
        if dto.items.iter().any(|item| item.quantity < 1) {
            return Err("Item quantity must be at least 1".to_string());
        }
        let order_type = OrderType::parse(&dto.order_type)
            .ok_or_else(|| "Order type must be dine_in, take_away or delivery".to_string())?;
        let payment_method = PaymentMethod::parse(&dto.payment_method)
            .ok_or_else(|| "Payment method must be crypto, cash or transfer".to_string())?;
        let customer_name = dto.customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err("Customer name is required".to_string());
        }

        Ok(Self {
            user_id,
            lines: dto
                .items
                .into_iter()
                .map(|item| OrderLine {
                    menu_id: item.menu_id,
                    quantity: item.quantity,
                    notes: item.notes,
                })
                .collect(),
            order_type,
            customer_name,
            customer_phone: dto.customer_phone,
            table_number: dto.table_number,
            delivery_address: dto.delivery_address,
            notes: dto.notes,
            payment_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::CreateOrderItemDto;

    fn dto() -> CreateOrderDto {
        CreateOrderDto {
            items: vec![CreateOrderItemDto {
                menu_id: "menu-1".to_string(),
                quantity: 2,
                notes: None,
            }],
            order_type: "dine_in".to_string(),
            customer_name: "Budi".to_string(),
            customer_phone: None,
            table_number: Some("4".to_string()),
            delivery_address: None,
            notes: None,
            payment_method: "cash".to_string(),
        }
    }

    #[test]
    fn accepts_valid_order() {
        let params = CreateOrderParams::from_dto("user-1".to_string(), dto()).unwrap();
        assert_eq!(params.order_type, OrderType::DineIn);
        assert_eq!(params.payment_method, PaymentMethod::Cash);
        assert_eq!(params.lines.len(), 1);
    }

    #[test]
    fn rejects_invalid_orders() {
        let mut empty = dto();
        empty.items.clear();
        assert!(CreateOrderParams::from_dto("u".to_string(), empty).is_err());

        let mut zero_qty = dto();
        zero_qty.items[0].quantity = 0;
        assert!(CreateOrderParams::from_dto("u".to_string(), zero_qty).is_err());

        let mut bad_type = dto();
        bad_type.order_type = "drive_thru".to_string();
        assert!(CreateOrderParams::from_dto("u".to_string(), bad_type).is_err());

        let mut bad_method = dto();
        bad_method.payment_method = "card".to_string();
        assert!(CreateOrderParams::from_dto("u".to_string(), bad_method).is_err());

        let mut no_name = dto();
        no_name.customer_name = "  ".to_string();
        assert!(CreateOrderParams::from_dto("u".to_string(), no_name).is_err());
    }

    #[test]
    fn status_round_trips_known_values() {
        assert_eq!(OrderStatus::parse("completed"), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::Ready.as_str(), "ready");
    }
}
