//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Parameter types carry validated
//! input from controllers into the service layer.

pub mod analytics;
pub mod auth;
pub mod cafe;
pub mod chat;
pub mod inventory;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod page;
pub mod payment;
pub mod user;
