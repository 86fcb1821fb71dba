use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Cafe};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Cafe)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. The table will be created when `build()` is called.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables a cafe and its menu need: User, Cafe and Menu.
    pub fn with_cafe_tables(self) -> Self {
        self.with_table(User).with_table(Cafe).with_table(Menu)
    }

    /// Adds everything required for order placement and payment.
    ///
    /// Includes the cafe tables, Order, OrderItem and Payment, plus the loyalty
    /// tables since completing an order awards points.
    pub fn with_order_tables(self) -> Self {
        self.with_cafe_tables()
            .with_table(Order)
            .with_table(OrderItem)
            .with_table(Payment)
            .with_loyalty_tables()
    }

    /// Adds Inventory and StockMovement.
    pub fn with_inventory_tables(self) -> Self {
        self.with_table(Inventory).with_table(StockMovement)
    }

    /// Adds the five loyalty tables.
    pub fn with_loyalty_tables(self) -> Self {
        self.with_table(LoyaltyProgram)
            .with_table(LoyaltyMember)
            .with_table(LoyaltyReward)
            .with_table(MemberReward)
            .with_table(LoyaltyTransaction)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_order_tables()
            .with_inventory_tables()
            .with_table(CafeReview)
            .with_table(Favorite)
            .with_table(Chat)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
