use super::*;

/// Tests listing orders for one customer.
///
/// Verifies that only the customer's orders are returned, newest first, and that
/// the status filter applies.
///
/// Expected: two of the customer's orders, newest first; one when filtered by status
#[tokio::test]
async fn lists_customer_orders_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let customer = factory::create_customer(db).await?;
    let other = factory::create_customer(db).await?;

    let now = Utc::now();
    let (older, _) = factory::order::OrderFactory::new(db, &cafe.id, &customer.id)
        .item(&menu, 1)
        .created_at(now - Duration::hours(2))
        .build()
        .await?;
    let (newer, _) = factory::order::OrderFactory::new(db, &cafe.id, &customer.id)
        .item(&menu, 1)
        .status("completed")
        .created_at(now)
        .build()
        .await?;
    factory::order::OrderFactory::new(db, &cafe.id, &other.id)
        .item(&menu, 1)
        .build()
        .await?;

    let repo = OrderRepository::new(db);
    let page = repo
        .list(
            OrderFilter {
                user_id: Some(customer.id.clone()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].id, newer.id);
    assert_eq!(page.items[1].id, older.id);
    assert_eq!(page.items[0].items.len(), 1);

    let completed = repo
        .list(
            OrderFilter {
                user_id: Some(customer.id.clone()),
                status: Some("completed".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;
    assert_eq!(completed.total, 1);

    Ok(())
}
