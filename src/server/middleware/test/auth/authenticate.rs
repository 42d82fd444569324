use super::*;

/// Expected: Err(AuthError::MissingToken) without an Authorization header
#[tokio::test]
async fn rejects_request_without_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let state = AppState::for_tests(test.database().await.unwrap().clone());

    let headers = HeaderMap::new();
    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::MissingToken))));

    Ok(())
}

/// Expected: Err(AuthError::InvalidToken) for a token neither issuer signed
#[tokio::test]
async fn rejects_malformed_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let state = AppState::for_tests(test.database().await.unwrap().clone());

    let headers = bearer("not-a-jwt");
    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InvalidToken(_)))));

    Ok(())
}

/// Expected: Ok(Client) for a session token issued to the client
#[tokio::test]
async fn resolves_session_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(client.id, UserType::Client)?);
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;

    assert!(matches!(user, AuthenticatedUser::Client(ref c) if c.id == client.id));

    Ok(())
}

/// Session tokens name the collection, so a partner token never resolves a client with
/// the same id.
///
/// Expected: Err(AuthError::AccountNotFound)
#[tokio::test]
async fn session_token_is_scoped_to_user_type() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(client.id, UserType::Partner)?);
    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccountNotFound(_)))));

    Ok(())
}

/// Expected: Ok(Partner) for an identity token whose uid is linked to a partner
#[tokio::test]
async fn resolves_identity_token_by_uid() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    factory::client::ClientFactory::new(db)
        .identity_uid("uid-client")
        .build()
        .await?;
    let partner = factory::partner::PartnerFactory::new(db)
        .identity_uid("uid-partner")
        .build()
        .await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&identity_token("uid-partner", None));
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;

    assert!(matches!(user, AuthenticatedUser::Partner(ref p) if p.id == partner.id));

    Ok(())
}

/// Expected: Err(AuthError::AccountNotFound) for a verified identity with no local account
#[tokio::test]
async fn rejects_unlinked_identity() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let state = AppState::for_tests(test.database().await.unwrap().clone());

    let headers = bearer(&identity_token("uid-unknown", None));
    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccountNotFound(_)))));

    Ok(())
}

/// Expected: Err(AuthError::AccountInactive) for a deactivated account with a valid token
#[tokio::test]
async fn rejects_inactive_account() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::client::ClientFactory::new(db)
        .active(false)
        .build()
        .await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(client.id, UserType::Client)?);
    let result = AuthGuard::new(&state, &headers).require(&[]).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccountInactive(_)))));

    Ok(())
}

/// Expected: Ok(None) from `current` when no token is sent
#[tokio::test]
async fn current_is_none_without_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let state = AppState::for_tests(test.database().await.unwrap().clone());

    let headers = HeaderMap::new();
    assert!(AuthGuard::new(&state, &headers).current().await?.is_none());

    Ok(())
}

/// Expected: the identity claims of an external token, even without a linked account
#[tokio::test]
async fn reads_identity_claims_without_account() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let state = AppState::for_tests(test.database().await.unwrap().clone());

    let headers = bearer(&identity_token("uid-new", Some("new@example.com")));
    let claims = AuthGuard::new(&state, &headers).identity()?;

    assert_eq!(claims.sub, "uid-new");
    assert_eq!(claims.email.as_deref(), Some("new@example.com"));

    Ok(())
}
