use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{inventory::InventoryRepository, stock_movement::StockMovementRepository},
    model::{
        inventory::{InventoryFilter, MovementType, RecordMovementParams, StockStatus},
        page::PageRequest,
    },
};

mod list;
mod movement;
mod stock;
