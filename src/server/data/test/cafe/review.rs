use super::*;

/// Tests listing reviews with their reviewers.
///
/// Verifies that each review carries the reviewer's id and name and that the
/// cafe's ratings are all returned for averaging.
///
/// Expected: two reviews with reviewers, ratings [5, 3]
#[tokio::test]
async fn lists_reviews_with_reviewers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let first = factory::user::UserFactory::new(db).name("Ani").build().await?;
    let second = factory::user::UserFactory::new(db).name("Bima").build().await?;

    let repo = ReviewRepository::new(db);
    repo.create(&cafe.id, &first.id, 5, Some("Mantap".to_string()))
        .await?;
    repo.create(&cafe.id, &second.id, 3, None).await?;

    let page = repo.list_for_cafe(&cafe.id, PageRequest::default()).await?;
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|r| r.reviewer.is_some()));

    let mut ratings = repo.ratings_for_cafe(&cafe.id).await?;
    ratings.sort_unstable();
    assert_eq!(ratings, vec![3, 5]);

    assert!(repo.exists_for_user(&cafe.id, &first.id).await?);

    Ok(())
}
