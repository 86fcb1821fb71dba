use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::order::OrderRepository,
    model::{
        menu::Menu,
        order::{CreateOrderParams, OrderFilter, OrderLine, OrderType, PaymentMethod, PricedLine},
        page::PageRequest,
    },
};

mod create;
mod list;
mod sold_items;

fn order_params(user_id: &str) -> CreateOrderParams {
    CreateOrderParams {
        user_id: user_id.to_string(),
        lines: Vec::<OrderLine>::new(),
        order_type: OrderType::TakeAway,
        customer_name: "Dewi".to_string(),
        customer_phone: None,
        table_number: None,
        delivery_address: None,
        notes: Some("Less sugar".to_string()),
        payment_method: PaymentMethod::Cash,
    }
}
