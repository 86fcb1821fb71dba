use super::*;

/// Tests writing a restock balance.
///
/// Verifies that a restock stamps `last_restocked` and replaces the unit cost.
///
/// Expected: balance 45, unit cost 1200, last_restocked set
#[tokio::test]
async fn restock_updates_balance_and_cost() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let item = factory::inventory::create_inventory(db, &cafe.id).await?;

    let repo = InventoryRepository::new(db);
    let updated = repo
        .set_stock(&item.id, &cafe.id, 45.0, true, Some(1200.0), Utc::now())
        .await?;

    assert_eq!(updated.current_stock, 45.0);
    assert_eq!(updated.unit_cost, 1200.0);
    assert!(updated.last_restocked.is_some());

    let consumed = repo
        .set_stock(&item.id, &cafe.id, 40.0, false, Some(9999.0), Utc::now())
        .await?;
    assert_eq!(consumed.current_stock, 40.0);
    assert_eq!(consumed.unit_cost, 1200.0);

    Ok(())
}

/// Tests the low stock listing.
///
/// Verifies that inactive items are excluded even when below minimum.
///
/// Expected: only the active item at its minimum
#[tokio::test]
async fn low_stock_excludes_inactive_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let low = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .stock(2.0, 5.0, 50.0)
        .build()
        .await?;
    factory::inventory::InventoryFactory::new(db, &cafe.id)
        .stock(1.0, 5.0, 50.0)
        .is_active(false)
        .build()
        .await?;
    factory::inventory::create_inventory(db, &cafe.id).await?;

    let items = InventoryRepository::new(db).low_stock(&cafe.id).await?;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, low.id);

    Ok(())
}

/// Tests the expiry window query.
///
/// Verifies that items expiring inside the window are returned soonest first and
/// already expired or later items are not.
///
/// Expected: the two items expiring in 2 and 5 days, in that order
#[tokio::test]
async fn expiring_items_within_window() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let now = Utc::now();
    let later = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .expiry_date(now + Duration::days(5))
        .build()
        .await?;
    let sooner = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .expiry_date(now + Duration::days(2))
        .build()
        .await?;
    factory::inventory::InventoryFactory::new(db, &cafe.id)
        .expiry_date(now + Duration::days(30))
        .build()
        .await?;
    factory::inventory::InventoryFactory::new(db, &cafe.id)
        .expiry_date(now - Duration::days(1))
        .build()
        .await?;
    factory::inventory::create_inventory(db, &cafe.id).await?;

    let items = InventoryRepository::new(db)
        .expiring_between(&cafe.id, now, now + Duration::days(7))
        .await?;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, sooner.id);
    assert_eq!(items[1].id, later.id);

    Ok(())
}
