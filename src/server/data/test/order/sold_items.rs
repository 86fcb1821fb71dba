use super::*;

/// Tests the date window and sold item join used by analytics.
///
/// Verifies that orders outside the window are excluded and sold items carry the
/// menu name.
///
/// Expected: one order in the window with a single "Espresso" line of quantity 3
#[tokio::test]
async fn loads_orders_in_window_with_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let menu = factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Espresso")
        .price(15000.0)
        .build()
        .await?;
    let customer = factory::create_customer(db).await?;

    let now = Utc::now();
    factory::order::OrderFactory::new(db, &cafe.id, &customer.id)
        .item(&menu, 3)
        .created_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::order::OrderFactory::new(db, &cafe.id, &customer.id)
        .item(&menu, 1)
        .created_at(now - Duration::days(60))
        .build()
        .await?;

    let repo = OrderRepository::new(db);
    let orders = repo
        .list_created_between(Some(&cafe.id), now - Duration::days(30), now)
        .await?;
    assert_eq!(orders.len(), 1);

    let items = repo
        .sold_items(orders.iter().map(|o| o.id.clone()).collect())
        .await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].menu_name, "Espresso");
    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].total_price, 45000.0);

    Ok(())
}
