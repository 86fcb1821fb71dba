//! Demo data for a fresh database.
//!
//! Inserts an owner account, one cafe with its menu, a few inventory items and a loyalty
//! program with rewards. Everything is written in one transaction.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{cafe::CreateCafeDto, inventory::CreateInventoryDto, menu::CreateMenuDto},
    server::{
        data::{
            cafe::CafeRepository,
            inventory::InventoryRepository,
            loyalty::{program::LoyaltyProgramRepository, reward::LoyaltyRewardRepository},
            menu::MenuRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            cafe::CreateCafeParams,
            inventory::CreateInventoryParams,
            loyalty::{CreateProgramParams, CreateRewardParams},
            menu::CreateMenuParams,
            user::{CreateUserParams, Role},
        },
        util::password::hash_password,
    },
};

pub const SEED_OWNER_EMAIL: &str = "admin@siipcoffee.com";
const SEED_OWNER_PASSWORD: &str = "password";

/// (name, category, price, description, prep minutes, calories)
const MENUS: [(&str, &str, f64, &str, i32, i32); 7] = [
    ("Espresso", "coffee", 15000.0, "Kopi espresso klasik yang kuat dan kaya rasa", 5, 5),
    ("Cappuccino", "coffee", 25000.0, "Espresso dengan susu foam yang lembut", 7, 120),
    ("Caramel Macchiato", "coffee", 35000.0, "Espresso dengan susu dan saus karamel", 10, 190),
    ("Green Tea Latte", "tea", 30000.0, "Teh hijau Jepang dengan susu", 8, 150),
    ("Croissant", "food", 20000.0, "Pastry butter yang renyah dari Prancis", 3, 231),
    ("Chocolate Cake", "dessert", 45000.0, "Kue coklat yang lembut dan moist", 5, 350),
    ("Orange Juice", "juice", 25000.0, "Jus jeruk segar tanpa gula", 5, 110),
];

/// Seeds demo data when the user table is empty.
///
/// # Returns
/// - `Ok(true)` - Demo data inserted
/// - `Ok(false)` - Users already exist; nothing written
/// - `Err(AppError)` - Hashing or an insert failed; the transaction is rolled back
pub async fn seed_if_empty(db: &DatabaseConnection) -> Result<bool, AppError> {
    if UserRepository::new(db).count().await? > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(SEED_OWNER_PASSWORD)?;

    let txn = db.begin().await?;
    seed(&txn, password_hash).await?;
    txn.commit().await?;

    tracing::info!("Seeded demo data, owner login {}", SEED_OWNER_EMAIL);

    Ok(true)
}

async fn seed<C: ConnectionTrait>(db: &C, password_hash: String) -> Result<(), AppError> {
    let owner = UserRepository::new(db)
        .create(CreateUserParams {
            name: "Cafe Admin".to_string(),
            email: SEED_OWNER_EMAIL.to_string(),
            password_hash,
            role: Role::Owner,
            phone: Some("+62 812-3456-7890".to_string()),
            address: Some("Jl. Cafe No. 123, Jakarta".to_string()),
        })
        .await?;

    let cafe = CafeRepository::new(db)
        .create(CreateCafeParams::from_dto(
            owner.id,
            CreateCafeDto {
                name: "SiipCoffee Central".to_string(),
                description: Some(
                    "Coffee shop modern dengan wifi nyaman dan suasana yang cozy".to_string(),
                ),
                address: Some("Jl. Sudirman No. 45, Jakarta Pusat".to_string()),
                city: Some("Jakarta".to_string()),
                province: Some("DKI Jakarta".to_string()),
                postal_code: Some("10210".to_string()),
                phone: Some("+62 21-1234-5678".to_string()),
                email: Some("info@siipcoffee.com".to_string()),
                coordinate_lat: Some(-6.2088),
                coordinate_lng: Some(106.8456),
                service_charge_percentage: Some(5.0),
                delivery_fee: Some(10000.0),
                min_order_amount: Some(25000.0),
                features: Some(r#"["wifi","outdoor_seating","delivery","take_away"]"#.to_string()),
                ..Default::default()
            },
        ))
        .await?;

    let menu_repo = MenuRepository::new(db);
    let mut espresso_id = None;
    let mut croissant_id = None;
    for (name, category, price, description, prep_time, calories) in MENUS {
        let menu = menu_repo
            .create(CreateMenuParams::from_dto(
                cafe.id.clone(),
                CreateMenuDto {
                    name: name.to_string(),
                    category: category.to_string(),
                    price,
                    description: Some(description.to_string()),
                    prep_time: Some(prep_time),
                    calories: Some(calories),
                    is_popular: Some(matches!(name, "Espresso" | "Cappuccino" | "Chocolate Cake")),
                    is_recommended: Some(matches!(name, "Cappuccino" | "Caramel Macchiato")),
                    ..Default::default()
                },
            ))
            .await?;
        match name {
            "Espresso" => espresso_id = Some(menu.id),
            "Croissant" => croissant_id = Some(menu.id),
            _ => {}
        }
    }

    let inventory_repo = InventoryRepository::new(db);
    for dto in inventory_items() {
        let params =
            CreateInventoryParams::from_dto(cafe.id.clone(), dto).map_err(AppError::InternalError)?;
        inventory_repo.create(params).await?;
    }

    let program = LoyaltyProgramRepository::new(db)
        .create(CreateProgramParams {
            cafe_id: cafe.id.clone(),
            name: "SiipCoffee Rewards".to_string(),
            description: Some(
                "Earn points with every purchase and redeem for free drinks and food".to_string(),
            ),
            points_per_currency: 0.001,
            currency_per_point: 1000.0,
            min_order_for_points: 10000.0,
            points_expiry_months: 12,
            tier_rules: None,
        })
        .await?;

    let reward_repo = LoyaltyRewardRepository::new(db);
    let rewards = [
        reward(
            "Free Espresso",
            "Get a free cup of our signature espresso",
            "free_item",
            150,
            espresso_id,
            0.0,
        ),
        CreateRewardParams {
            discount_value: 10.0,
            discount_type: Some("percentage".to_string()),
            ..reward(
                "10% Discount",
                "Get 10% off your entire order",
                "discount",
                200,
                None,
                25000.0,
            )
        },
        reward(
            "Free Croissant",
            "Get a free croissant with any coffee purchase",
            "free_item",
            200,
            croissant_id,
            20000.0,
        ),
    ];
    for params in rewards {
        reward_repo.create(&program, params).await?;
    }

    Ok(())
}

fn reward(
    name: &str,
    description: &str,
    reward_type: &str,
    points_cost: i32,
    free_item_id: Option<String>,
    min_order_value: f64,
) -> CreateRewardParams {
    CreateRewardParams {
        name: name.to_string(),
        reward_type: reward_type.to_string(),
        points_cost,
        description: Some(description.to_string()),
        discount_value: 0.0,
        discount_type: None,
        free_item_id,
        min_order_value,
        max_uses: 0,
        valid_from: None,
        valid_until: None,
        conditions: None,
    }
}

fn inventory_items() -> Vec<CreateInventoryDto> {
    let item = |name: &str, category: &str, unit: &str, levels: (f64, f64, f64), cost: f64| {
        CreateInventoryDto {
            name: name.to_string(),
            category: category.to_string(),
            unit: unit.to_string(),
            current_stock: Some(levels.0),
            min_stock_level: Some(levels.1),
            max_stock_level: Some(levels.2),
            unit_cost: Some(cost),
            ..Default::default()
        }
    };

    vec![
        CreateInventoryDto {
            description: Some("Premium arabica coffee beans from Ethiopia".to_string()),
            supplier: Some("Coffee Supplier Inc".to_string()),
            location: Some("warehouse".to_string()),
            ..item("Coffee Beans Arabica", "raw_material", "kg", (15.5, 5.0, 50.0), 150000.0)
        },
        CreateInventoryDto {
            description: Some("Full cream fresh milk".to_string()),
            supplier: Some("Dairy Farm Co".to_string()),
            location: Some("kitchen".to_string()),
            ..item("Fresh Milk", "raw_material", "liter", (8.0, 3.0, 20.0), 18000.0)
        },
        CreateInventoryDto {
            description: Some("Disposable paper cups 16oz".to_string()),
            supplier: Some("Packaging Supplier".to_string()),
            location: Some("storage".to_string()),
            ..item("Paper Cups Large", "packaging", "pcs", (200.0, 50.0, 1000.0), 800.0)
        },
    ]
}

#[cfg(test)]
mod tests {
    use sea_orm::{EntityTrait, PaginatorTrait};
    use test_utils::builder::TestBuilder;

    use super::*;

    #[tokio::test]
    async fn seeds_once() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        assert!(seed_if_empty(db).await?);
        assert!(!seed_if_empty(db).await?);

        assert_eq!(entity::prelude::User::find().count(db).await?, 1);
        assert_eq!(entity::prelude::Menu::find().count(db).await?, 7);
        assert_eq!(entity::prelude::Inventory::find().count(db).await?, 3);
        assert_eq!(entity::prelude::LoyaltyReward::find().count(db).await?, 3);

        Ok(())
    }
}
