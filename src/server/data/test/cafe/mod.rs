use crate::server::{
    data::{cafe::CafeRepository, favorite::FavoriteRepository, review::ReviewRepository},
    model::{cafe::CafeFilter, page::PageRequest},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod favorite;
mod list;
mod review;
