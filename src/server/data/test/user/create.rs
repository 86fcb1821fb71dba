use super::*;

/// Tests creating a new user.
///
/// Verifies that the repository stores the user with the given role and returns it
/// as a domain model.
///
/// Expected: Ok with an owner user carrying a generated id
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Owner,
            phone: Some("0812".to_string()),
            address: None,
        })
        .await?;

    assert!(!user.id.is_empty());
    assert_eq!(user.role, Role::Owner);
    assert_eq!(user.phone.as_deref(), Some("0812"));

    let found = repo.find_by_id(&user.id).await?;
    assert_eq!(found, Some(user));

    Ok(())
}

/// Tests that credentials lookup returns the stored hash.
///
/// Verifies that `find_credentials_by_email` returns the user together with the
/// password hash stored for them.
///
/// Expected: Ok(Some((user, hash)))
#[tokio::test]
async fn finds_credentials_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .email("budi@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let (user, hash) = repo
        .find_credentials_by_email("budi@example.com")
        .await?
        .unwrap();

    assert_eq!(user.id, created.id);
    assert_eq!(hash, created.password_hash);
    assert!(repo
        .find_credentials_by_email("nobody@example.com")
        .await?
        .is_none());

    Ok(())
}
