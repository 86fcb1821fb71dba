use super::*;

/// Tests partial profile updates.
///
/// Verifies that only provided fields change and the rest keep their values.
///
/// Expected: Ok(Some(user)) with the new phone and the original name
#[tokio::test]
async fn updates_only_given_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .name("Original")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            &user.id,
            UpdateProfileParams {
                phone: Some("0899".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Original");
    assert_eq!(updated.phone.as_deref(), Some("0899"));

    Ok(())
}

/// Tests updating a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .update_profile("missing", UpdateProfileParams::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
