use crate::server::{data::menu::MenuRepository, model::menu::UpdateMenuParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod list;
mod search;
mod soft_delete;
