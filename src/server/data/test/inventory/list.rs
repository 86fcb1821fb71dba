use super::*;

/// Tests filtering the inventory list by stock status.
///
/// Verifies that the SQL status condition agrees with stock classification: low at or
/// below minimum, overstock at or above a non-zero maximum, optimal otherwise.
///
/// Expected: one item per status, and the unbounded item counted as optimal
#[tokio::test]
async fn filters_by_stock_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let low = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .name("Arabica Beans")
        .stock(5.0, 5.0, 50.0)
        .build()
        .await?;
    let optimal = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .name("Milk")
        .stock(20.0, 5.0, 50.0)
        .build()
        .await?;
    let overstock = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .name("Sugar")
        .stock(60.0, 5.0, 50.0)
        .build()
        .await?;
    factory::inventory::InventoryFactory::new(db, &cafe.id)
        .name("Cups")
        .stock(900.0, 10.0, 0.0)
        .build()
        .await?;

    let repo = &InventoryRepository::new(db);
    let cafe_id = cafe.id.as_str();
    let list = move |status| {
        repo.list(
            cafe_id,
            InventoryFilter {
                status: Some(status),
                ..Default::default()
            },
            PageRequest::default(),
        )
    };

    let lows = list(StockStatus::Low).await?;
    assert_eq!(lows.total, 1);
    assert_eq!(lows.items[0].id, low.id);

    let overs = list(StockStatus::Overstock).await?;
    assert_eq!(overs.total, 1);
    assert_eq!(overs.items[0].id, overstock.id);

    let optimals = list(StockStatus::Optimal).await?;
    assert_eq!(optimals.total, 2);
    // Ordered by name
    assert_eq!(optimals.items[0].name, "Cups");
    assert_eq!(optimals.items[1].id, optimal.id);

    Ok(())
}

/// Tests that items of other cafes and deleted items are not listed.
///
/// Expected: only the live item of the requested cafe
#[tokio::test]
async fn scopes_list_to_cafe() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let (_, other_cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let kept = factory::inventory::create_inventory(db, &cafe.id).await?;
    let deleted = factory::inventory::create_inventory(db, &cafe.id).await?;
    factory::inventory::create_inventory(db, &other_cafe.id).await?;

    let repo = InventoryRepository::new(db);
    assert!(repo.soft_delete(&deleted.id, &cafe.id).await?);
    assert!(!repo.soft_delete(&kept.id, &other_cafe.id).await?);

    let page = repo
        .list(&cafe.id, InventoryFilter::default(), PageRequest::default())
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, kept.id);

    Ok(())
}
