//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Pricing, stock balances, point awards and access rules
//! - **Orchestration**: Coordinating repository calls and the concierge model
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Multi-step writes commit together or not at all

pub mod analytics;
pub mod auth;
pub mod cafe;
pub mod chat;
pub mod inventory;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod payment;
pub mod receipt;
pub mod user;

#[cfg(test)]
mod test;
