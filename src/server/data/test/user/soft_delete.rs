use sea_orm::EntityTrait;

use super::*;

fn params(email: &str) -> CreateUserParams {
    CreateUserParams {
        name: "Budi".to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role: Role::Customer,
        phone: None,
        address: None,
    }
}

/// Tests soft deleting a user.
///
/// Verifies that a deleted user can no longer be found, and that deleting twice
/// reports nothing to delete.
///
/// Expected: true then false, and find_by_id returns None
#[tokio::test]
async fn hides_deleted_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_customer(db).await?;

    let repo = UserRepository::new(db);
    assert!(repo.soft_delete(&user.id).await?);
    assert!(!repo.soft_delete(&user.id).await?);
    assert!(repo.find_by_id(&user.id).await?.is_none());

    // The row is kept
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests that deleting a user releases their email.
///
/// Verifies that the stored email no longer matches, so a new account can be created
/// with the same address despite the unique index.
///
/// Expected: email_in_use is false and create succeeds
#[tokio::test]
async fn releases_email_of_deleted_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("budi@example.com")).await?;
    assert!(repo.soft_delete(&user.id).await?);

    assert!(!repo.email_in_use("budi@example.com", None).await?);
    let again = repo.create(params("budi@example.com")).await?;
    assert_ne!(again.id, user.id);

    let deleted = entity::prelude::User::find_by_id(user.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(deleted.email, format!("deleted+{}+budi@example.com", user.id));

    Ok(())
}
