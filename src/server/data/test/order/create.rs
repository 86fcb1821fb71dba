use super::*;

/// Tests creating an order with priced lines.
///
/// Verifies that line totals use the menu price, the order total is their sum, and
/// the new order starts pending with pending payment.
///
/// Expected: total 65000 from 2 x 25000 + 1 x 15000
#[tokio::test]
async fn creates_order_with_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe, latte) = factory::helpers::create_menu_with_dependencies(db).await?;
    let espresso = factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Espresso")
        .price(15000.0)
        .build()
        .await?;
    let customer = factory::create_customer(db).await?;

    let repo = OrderRepository::new(db);
    let order = repo
        .create(
            &order_params(&customer.id),
            &cafe.id,
            "ORD-20250101-abcdef12".to_string(),
            vec![
                PricedLine {
                    menu: Menu::from_entity(latte),
                    quantity: 2,
                    notes: None,
                },
                PricedLine {
                    menu: Menu::from_entity(espresso),
                    quantity: 1,
                    notes: Some("Hot".to_string()),
                },
            ],
        )
        .await?;

    assert_eq!(order.total_amount, 65000.0);
    assert_eq!(order.subtotal_amount, 65000.0);
    assert_eq!(order.status, "pending");
    assert_eq!(order.payment_status, "pending");
    assert_eq!(order.order_type, "take_away");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].total_price, 50000.0);

    let stored = repo.find_by_id(&order.id).await?.unwrap();
    assert_eq!(stored.items.len(), 2);
    assert!(stored.items.iter().all(|i| i.menu.is_some()));

    Ok(())
}
