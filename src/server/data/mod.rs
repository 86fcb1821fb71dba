//! Database repository layer for all domain entities.
//!
//! Repositories handle CRUD for each domain and are generic over `ConnectionTrait`, so the
//! same code runs against the connection pool or inside a transaction. They use SeaORM entity
//! models internally and return domain models to the service layer. Soft-deleted rows are
//! filtered out here and never reach callers.

pub mod cafe;
pub mod chat;
pub mod favorite;
pub mod inventory;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod payment;
pub mod review;
pub mod stock_movement;
pub mod user;

#[cfg(test)]
mod test;
