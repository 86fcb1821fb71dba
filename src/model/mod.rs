//! Request and response bodies exchanged over the HTTP API.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod cafe;
pub mod chat;
pub mod inventory;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod payment;
pub mod user;
