pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_user_table;
mod m20251001_000002_create_cafe_table;
mod m20251001_000003_create_cafe_review_table;
mod m20251001_000004_create_favorite_table;
mod m20251001_000005_create_menu_table;
mod m20251001_000006_create_order_table;
mod m20251001_000007_create_order_item_table;
mod m20251001_000008_create_payment_table;
mod m20251001_000009_create_inventory_table;
mod m20251001_000010_create_stock_movement_table;
mod m20251001_000011_create_loyalty_program_table;
mod m20251001_000012_create_loyalty_member_table;
mod m20251001_000013_create_loyalty_reward_table;
mod m20251001_000014_create_member_reward_table;
mod m20251001_000015_create_loyalty_transaction_table;
mod m20251001_000016_create_chat_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_user_table::Migration),
            Box::new(m20251001_000002_create_cafe_table::Migration),
            Box::new(m20251001_000003_create_cafe_review_table::Migration),
            Box::new(m20251001_000004_create_favorite_table::Migration),
            Box::new(m20251001_000005_create_menu_table::Migration),
            Box::new(m20251001_000006_create_order_table::Migration),
            Box::new(m20251001_000007_create_order_item_table::Migration),
            Box::new(m20251001_000008_create_payment_table::Migration),
            Box::new(m20251001_000009_create_inventory_table::Migration),
            Box::new(m20251001_000010_create_stock_movement_table::Migration),
            Box::new(m20251001_000011_create_loyalty_program_table::Migration),
            Box::new(m20251001_000012_create_loyalty_member_table::Migration),
            Box::new(m20251001_000013_create_loyalty_reward_table::Migration),
            Box::new(m20251001_000014_create_member_reward_table::Migration),
            Box::new(m20251001_000015_create_loyalty_transaction_table::Migration),
            Box::new(m20251001_000016_create_chat_table::Migration),
        ]
    }
}
