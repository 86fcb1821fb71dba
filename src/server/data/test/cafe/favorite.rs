use super::*;

/// Tests that adding a favorite twice keeps a single row.
///
/// Expected: the same favorite id both times and one listed favorite
#[tokio::test]
async fn adding_favorite_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;

    let repo = FavoriteRepository::new(db);
    let first = repo.add(&customer.id, &cafe.id).await?;
    let second = repo.add(&customer.id, &cafe.id).await?;
    assert_eq!(first.id, second.id);

    let favorites = repo.list_for_user(&customer.id).await?;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].1.id, cafe.id);

    Ok(())
}

/// Tests removing favorites.
///
/// Expected: true on first removal, false when nothing is left
#[tokio::test]
async fn removes_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;

    let repo = FavoriteRepository::new(db);
    repo.add(&customer.id, &cafe.id).await?;

    assert!(repo.remove(&customer.id, &cafe.id).await?);
    assert!(!repo.remove(&customer.id, &cafe.id).await?);
    assert!(repo.list_for_user(&customer.id).await?.is_empty());

    Ok(())
}
