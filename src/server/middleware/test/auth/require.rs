use super::*;

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn fails_without_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let result = AuthGuard::new(db, &keys, &HeaderMap::new())
        .require(&[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a header that is not a bearer token.
///
/// Verifies that a present but malformed header is told apart from a missing one.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let result = AuthGuard::new(db, &keys, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_forged_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let user = factory::create_customer(db).await?;
    let forged = JwtKeys::new("other-secret", Duration::hours(1));
    let (token, _) = forged.issue(&user.id, "customer")?;

    let result = AuthGuard::new(db, &keys, &bearer(&token))
        .require(&[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a valid token for an authenticated-only endpoint.
///
/// Expected: Ok(User) matching the token subject
#[tokio::test]
async fn resolves_user_from_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let user = factory::create_customer(db).await?;
    let (token, _) = keys.issue(&user.id, "customer")?;

    let resolved = AuthGuard::new(db, &keys, &bearer(&token))
        .require(&[])
        .await?;

    assert_eq!(resolved.id, user.id);

    Ok(())
}

/// Tests a valid token whose user has since been deleted.
///
/// Expected: Err(AuthError::UserNotFound)
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let user = factory::create_customer(db).await?;
    let (token, _) = keys.issue(&user.id, "customer")?;
    UserRepository::new(db).soft_delete(&user.id).await?;

    let result = AuthGuard::new(db, &keys, &bearer(&token))
        .require(&[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotFound(_)))
    ));

    Ok(())
}

/// Tests role checks in both directions.
///
/// Verifies that the role stored on the user decides access, not the token claim.
///
/// Expected: owner passes Owner and fails Customer; customer fails Owner
#[tokio::test]
async fn checks_role_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let owner = factory::create_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    let (owner_token, _) = keys.issue(&owner.id, "owner")?;
    // Claim says owner but the stored role is customer
    let (customer_token, _) = keys.issue(&customer.id, "owner")?;

    let owner_headers = bearer(&owner_token);
    let guard = AuthGuard::new(db, &keys, &owner_headers);
    assert!(guard.require(&[Permission::Owner]).await.is_ok());
    assert!(matches!(
        guard.require(&[Permission::Customer]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let customer_headers = bearer(&customer_token);
    let result = AuthGuard::new(db, &keys, &customer_headers)
        .require(&[Permission::Owner])
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests the query-parameter token used by the chat socket.
///
/// Expected: Ok(User) with a token, MissingToken with an empty one
#[tokio::test]
async fn accepts_out_of_band_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let user = factory::create_customer(db).await?;
    let (token, _) = keys.issue(&user.id, "customer")?;

    let resolved = AuthGuard::with_token(db, &keys, Some(&token))
        .require(&[Permission::Customer])
        .await?;
    assert_eq!(resolved.id, user.id);

    let result = AuthGuard::with_token(db, &keys, Some("")).require(&[]).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a bearer header without a token after the scheme.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_empty_bearer_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));

    let result = AuthGuard::new(db, &keys, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}
