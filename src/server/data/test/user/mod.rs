use crate::server::{
    data::user::UserRepository,
    model::user::{CreateUserParams, Role, UpdateProfileParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod email_in_use;
mod soft_delete;
mod update_profile;
