//! SeaORM entity definitions for the SiipCoffee schema.
//!
//! Each module maps one table created by the `migration` crate. Relations between tables are
//! resolved with explicit foreign-key lookups in the repository layer, so the `Relation` enums
//! are left empty.

pub mod prelude;

pub mod cafe;
pub mod cafe_review;
pub mod chat;
pub mod favorite;
pub mod inventory;
pub mod loyalty_member;
pub mod loyalty_program;
pub mod loyalty_reward;
pub mod loyalty_transaction;
pub mod member_reward;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod stock_movement;
pub mod user;
