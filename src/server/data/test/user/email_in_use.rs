use super::*;

/// Tests email collision detection.
///
/// Verifies that an email held by another active user is reported as in use, while
/// the holder themselves is excluded.
///
/// Expected: true for other users, false when excluding the owner of the email
#[tokio::test]
async fn detects_email_held_by_other_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let holder = factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    assert!(repo.email_in_use("taken@example.com", None).await?);
    assert!(!repo.email_in_use("taken@example.com", Some(&holder.id)).await?);
    assert!(!repo.email_in_use("free@example.com", None).await?);

    Ok(())
}

/// Tests that soft-deleted users release their email.
///
/// Expected: false after the holder is soft deleted
#[tokio::test]
async fn ignores_deleted_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let holder = factory::user::UserFactory::new(db)
        .email("gone@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    repo.soft_delete(&holder.id).await?;

    assert!(!repo.email_in_use("gone@example.com", None).await?);

    Ok(())
}
