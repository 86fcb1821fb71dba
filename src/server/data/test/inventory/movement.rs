use super::*;

/// Tests recording and listing stock movements.
///
/// Verifies that total cost is quantity times unit cost and that the listing
/// carries the item and performer names, newest first.
///
/// Expected: two movements, the waste entry first with total cost 2000
#[tokio::test]
async fn lists_movements_with_names() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_inventory_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let item = factory::inventory::InventoryFactory::new(db, &cafe.id)
        .name("Oat Milk")
        .build()
        .await?;

    let params = |movement_type, quantity| RecordMovementParams {
        inventory_id: item.id.clone(),
        cafe_id: cafe.id.clone(),
        movement_type,
        quantity,
        unit_cost: None,
        reason: "Weekly count".to_string(),
        reference_id: None,
        notes: None,
        performed_by: owner.id.clone(),
    };

    let repo = StockMovementRepository::new(db);
    let now = Utc::now();
    repo.create(params(MovementType::In, 10.0), 1000.0, 30.0, now - Duration::minutes(5))
        .await?;
    let waste = repo
        .create(params(MovementType::Waste, 2.0), 1000.0, 28.0, now)
        .await?;
    assert_eq!(waste.total_cost, 2000.0);

    let page = repo.list_for_item(&item.id, PageRequest::default()).await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].id, waste.id);
    assert_eq!(page.items[0].balance_after, 28.0);
    assert_eq!(page.items[0].inventory_name.as_deref(), Some("Oat Milk"));
    assert_eq!(
        page.items[0].performed_by_name.as_deref(),
        Some(owner.name.as_str())
    );

    Ok(())
}
