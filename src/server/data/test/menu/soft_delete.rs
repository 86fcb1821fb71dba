use super::*;

/// Tests soft deleting a menu item.
///
/// Verifies that the item disappears from lookups and further updates.
///
/// Expected: true, then not found by id and update returns None
#[tokio::test]
async fn hides_deleted_menu() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, menu) = factory::helpers::create_menu_with_dependencies(db).await?;

    let repo = MenuRepository::new(db);
    assert!(repo.soft_delete(&menu.id).await?);
    assert!(repo.find_by_id(&menu.id).await?.is_none());

    let update = repo
        .update(
            &menu.id,
            UpdateMenuParams {
                price: Some(1.0),
                ..Default::default()
            },
        )
        .await?;
    assert!(update.is_none());

    // Deleted menus stay resolvable for historical orders
    let by_ids = repo.find_by_ids(vec![menu.id.clone()]).await?;
    assert!(!by_ids[&menu.id].is_available);

    Ok(())
}
