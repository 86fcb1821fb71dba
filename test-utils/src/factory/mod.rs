//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation. Factories insert straight
//! into the database and return the stored model.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let (owner, cafe) = factory::helpers::create_cafe_with_owner(&db).await?;
//!     let menu = factory::menu::MenuFactory::new(&db, &cafe.id)
//!         .name("Espresso")
//!         .price(15000.0)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users of either role
//! - `cafe` - Cafes owned by a user
//! - `menu` - Menu items of a cafe
//! - `order` - Orders and their line items
//! - `inventory` - Inventory items of a cafe
//! - `loyalty` - Loyalty programs, members and rewards
//! - `helpers` - ID generation and dependency shortcuts

pub mod cafe;
pub mod helpers;
pub mod inventory;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod user;

pub use cafe::create_cafe;
pub use inventory::create_inventory;
pub use menu::create_menu;
pub use user::{create_customer, create_owner, create_user};
