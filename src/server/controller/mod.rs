//! HTTP handlers.
//!
//! Each handler authenticates through `AuthGuard`, calls one service and converts the
//! domain result into a DTO wrapped in the response envelope. Every handler carries a
//! `utoipa::path` annotation collected by the router's OpenAPI document.

pub mod admin;
pub mod auth;
pub mod cafe;
pub mod chat;
pub mod health;
pub mod inventory;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod owner;
pub mod payment;
pub mod user;
