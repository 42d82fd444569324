use super::*;

mod require_admin;
mod require_grant;
mod require_participant;
mod require_self_or_admin;

/// Expected: Ok(user) for any active account when no permission is required
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let partner = factory::create_partner(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(partner.id, UserType::Partner)?);
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;

    assert_eq!(user.id(), partner.id);
    assert_eq!(user.user_type(), UserType::Partner);

    Ok(())
}

/// Expected: Err(AuthError::AccessDenied) when one of several permissions fails
#[tokio::test]
async fn fails_if_any_permission_missing() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(client.id, UserType::Client)?);
    let result = AuthGuard::new(&state, &headers)
        .require(&[
            Permission::SelfOrAdmin(UserType::Client, client.id),
            Permission::Admin,
        ])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(msg))) => assert!(msg.contains("admin")),
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

/// Expected: Ok(Client) for the client role, Err(AccessDenied) for the partner role
#[tokio::test]
async fn checks_role() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(client.id, UserType::Client)?);
    let guard = AuthGuard::new(&state, &headers);

    assert!(guard.require(&[Permission::Role(UserType::Client)]).await.is_ok());
    assert!(matches!(
        guard.require(&[Permission::Role(UserType::Partner)]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));

    Ok(())
}
