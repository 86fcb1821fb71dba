use super::*;
use crate::{
    model::inventory::CreateStockMovementDto,
    server::{
        model::{inventory::MAX_EXPIRY_WINDOW_DAYS, page::PageRequest},
        service::inventory::InventoryService,
    },
};

fn movement(movement_type: &str, quantity: f64) -> CreateStockMovementDto {
    CreateStockMovementDto {
        movement_type: movement_type.to_string(),
        quantity,
        unit_cost: None,
        reason: "Daily count".to_string(),
        reference_id: None,
        notes: None,
    }
}

/// Tests a restock followed by usage.
///
/// Expected: 10 + 5 = 15, then 15 - 4 = 11, with both movements listed newest first
#[tokio::test]
async fn records_restock_and_usage() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let item = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .stock(10.0, 2.0, 50.0)
        .build()
        .await?;
    let owner = load_user(db, &owner.id).await?;
    let service = InventoryService::new(db);

    let (restock, updated) = service
        .record_movement(&owner, &item.id, movement("in", 5.0))
        .await?;
    assert_eq!(restock.balance_after, 15.0);
    assert_eq!(updated.current_stock, 15.0);
    assert!(updated.last_restocked.is_some());

    let (usage, updated) = service
        .record_movement(&owner, &item.id, movement("out", 4.0))
        .await?;
    assert_eq!(usage.balance_after, 11.0);
    assert_eq!(updated.current_stock, 11.0);

    let movements = service
        .movements(&owner.id, &item.id, PageRequest::new(None, None, 20))
        .await?;
    assert_eq!(movements.total, 2);

    Ok(())
}

/// Tests that stock never goes negative.
///
/// Expected: Err(AppError::BadRequest), stock unchanged and no movement stored
#[tokio::test]
async fn insufficient_stock_writes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let item = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .stock(3.0, 1.0, 10.0)
        .build()
        .await?;
    let owner = load_user(db, &owner.id).await?;

    let result = InventoryService::new(db)
        .record_movement(&owner, &item.id, movement("waste", 4.0))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(count(db, entity::prelude::StockMovement).await?, 0);

    let stored = entity::prelude::Inventory::find_by_id(item.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.current_stock, 3.0);

    Ok(())
}

/// Tests movement validation before anything is read.
#[tokio::test]
async fn rejects_invalid_movement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let item = factory::create_inventory(db, &cafe.id).await?;
    let owner = load_user(db, &owner.id).await?;
    let service = InventoryService::new(db);

    for dto in [movement("transfer", 1.0), movement("in", 0.0)] {
        let result = service.record_movement(&owner, &item.id, dto).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    let mut blank_reason = movement("in", 1.0);
    blank_reason.reason = "  ".to_string();
    let result = service.record_movement(&owner, &item.id, blank_reason).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that another owner cannot touch the item.
#[tokio::test]
async fn hides_items_of_other_cafes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let (other_owner, _) = factory::helpers::create_cafe_with_owner(db).await?;
    let item = factory::create_inventory(db, &cafe.id).await?;
    let other_owner = load_user(db, &other_owner.id).await?;

    let result = InventoryService::new(db)
        .record_movement(&other_owner, &item.id, movement("in", 1.0))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests the expiring window must be at least one day.
#[tokio::test]
async fn rejects_non_positive_expiry_window() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, _) = factory::helpers::create_cafe_with_owner(db).await?;

    let result = InventoryService::new(db).expiring(&owner.id, 0).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests the expiring window upper bound.
///
/// Verifies that the largest allowed window is accepted and that anything beyond it,
/// up to values that would overflow a timestamp, is rejected.
///
/// Expected: Ok at the bound, Err(BadRequest) above it
#[tokio::test]
async fn bounds_expiry_window() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, _) = factory::helpers::create_cafe_with_owner(db).await?;
    let service = InventoryService::new(db);

    assert!(service
        .expiring(&owner.id, MAX_EXPIRY_WINDOW_DAYS)
        .await?
        .is_empty());

    for days in [MAX_EXPIRY_WINDOW_DAYS + 1, 100_000_000, i64::MAX] {
        let result = service.expiring(&owner.id, days).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}
