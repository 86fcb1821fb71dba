use super::*;

/// Tests listing a cafe's menu.
///
/// Verifies that unavailable and deleted items are excluded and the rest are
/// ordered by category, then name.
///
/// Expected: [Cappuccino, Espresso, Croissant] (coffee before food)
#[tokio::test]
async fn lists_available_menus_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Croissant")
        .category("food")
        .build()
        .await?;
    factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Espresso")
        .build()
        .await?;
    factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Cappuccino")
        .build()
        .await?;
    factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Sold Out")
        .is_available(false)
        .build()
        .await?;
    factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Removed")
        .deleted()
        .build()
        .await?;

    let repo = MenuRepository::new(db);
    let menus = repo.list_available_by_cafe(&cafe.id, None).await?;
    let names: Vec<&str> = menus.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Cappuccino", "Espresso", "Croissant"]);

    let food = repo.list_available_by_cafe(&cafe.id, Some("food")).await?;
    assert_eq!(food.len(), 1);

    Ok(())
}

/// Tests that orderable lookups reject unavailable items.
///
/// Expected: find_by_id sees the unavailable item, find_orderable does not
#[tokio::test]
async fn orderable_requires_availability() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let menu = factory::menu::MenuFactory::new(db, &cafe.id)
        .is_available(false)
        .build()
        .await?;

    let repo = MenuRepository::new(db);
    assert!(repo.find_by_id(&menu.id).await?.is_some());
    assert!(repo.find_orderable(&menu.id).await?.is_none());

    Ok(())
}
