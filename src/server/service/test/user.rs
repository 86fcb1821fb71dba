use super::*;
use crate::server::{
    model::user::UpdateProfileParams, service::user::UserService, util::password::verify_password,
};

fn email_update(email: &str) -> UpdateProfileParams {
    UpdateProfileParams {
        name: None,
        email: Some(email.to_string()),
        phone: None,
        address: None,
    }
}

/// Tests changing the password with the right current password.
///
/// Expected: the stored hash verifies the new password only
#[tokio::test]
async fn changes_password() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password("lama123")
        .build()
        .await?;

    UserService::new(db)
        .change_password(&user.id, "lama123", "baru456")
        .await?;

    let stored = entity::prelude::User::find_by_id(user.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert!(verify_password("baru456", &stored.password_hash));
    assert!(!verify_password("lama123", &stored.password_hash));

    Ok(())
}

/// Tests the checks on a password change.
///
/// Expected: Err(AppError::BadRequest) for a wrong current password and for a new
/// password under six characters, with the old hash kept
#[tokio::test]
async fn rejects_invalid_password_change() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password("lama123")
        .build()
        .await?;
    let service = UserService::new(db);

    let wrong_current = service.change_password(&user.id, "salah99", "baru456").await;
    assert!(matches!(wrong_current, Err(AppError::BadRequest(_))));

    let too_short = service.change_password(&user.id, "lama123", "12345").await;
    assert!(matches!(too_short, Err(AppError::BadRequest(_))));

    let stored = entity::prelude::User::find_by_id(user.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert!(verify_password("lama123", &stored.password_hash));

    Ok(())
}

/// Tests deleting an account.
///
/// Verifies that a wrong password leaves the account alone and the right one hides it.
///
/// Expected: BadRequest first, then the user is soft deleted
#[tokio::test]
async fn deletes_account_with_password() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password("rahasia1")
        .build()
        .await?;
    let service = UserService::new(db);

    let result = service.delete_account(&user.id, "keliru").await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(load_user(db, &user.id).await.is_ok());

    service.delete_account(&user.id, "rahasia1").await?;

    let stored = entity::prelude::User::find_by_id(user.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert!(stored.deleted_at.is_some());

    let again = service.delete_account(&user.id, "rahasia1").await;
    assert!(matches!(
        again,
        Err(AppError::AuthErr(
            crate::server::error::auth::AuthError::UserNotFound(_)
        ))
    ));

    Ok(())
}

/// Tests switching to an email another active user holds.
///
/// Expected: Err(AppError::BadRequest) "Email already in use"
#[tokio::test]
async fn rejects_email_of_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;
    let user = factory::create_customer(db).await?;

    let result = UserService::new(db)
        .update_profile(&user.id, email_update(" Taken@Example.com "))
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Email already in use"),
        other => panic!("expected BadRequest, got {:?}", other.map(|u| u.email)),
    }

    Ok(())
}

/// Tests switching to the email of a deleted account.
///
/// Expected: Ok with the normalized email stored
#[tokio::test]
async fn takes_email_of_deleted_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let gone = factory::user::UserFactory::new(db)
        .email("gone@example.com")
        .password("rahasia1")
        .build()
        .await?;
    let user = factory::create_customer(db).await?;
    let service = UserService::new(db);
    service.delete_account(&gone.id, "rahasia1").await?;

    let updated = service
        .update_profile(&user.id, email_update("GONE@example.com"))
        .await?;

    assert_eq!(updated.email, "gone@example.com");

    Ok(())
}

/// Tests that adding the same favorite twice keeps a single row.
///
/// Expected: same favorite id both times, one row, one listed favorite
#[tokio::test]
async fn adds_favorite_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_table(entity::prelude::Favorite)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    let service = UserService::new(db);

    let first = service.add_favorite(&customer.id, &cafe.id).await?;
    let second = service.add_favorite(&customer.id, &cafe.id).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(first.cafe.id, cafe.id);
    assert_eq!(count(db, entity::prelude::Favorite).await?, 1);
    assert_eq!(service.favorites(&customer.id).await?.len(), 1);

    service.remove_favorite(&customer.id, &cafe.id).await?;
    let missing = service.remove_favorite(&customer.id, &cafe.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests favoriting a cafe that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_favorite_for_unknown_cafe() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_table(entity::prelude::Favorite)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;

    let result = UserService::new(db)
        .add_favorite(&customer.id, "missing-cafe")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that owners see their cafe in the profile and customers do not.
#[tokio::test]
async fn embeds_owned_cafe_in_profile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_cafe_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    let service = UserService::new(db);

    let profile = service.profile(load_user(db, &owner.id).await?).await?;
    assert_eq!(profile.cafe.map(|c| c.id), Some(cafe.id));

    let profile = service.profile(load_user(db, &customer.id).await?).await?;
    assert!(profile.cafe.is_none());

    Ok(())
}
