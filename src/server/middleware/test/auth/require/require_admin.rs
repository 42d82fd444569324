use super::*;

/// Expected: Ok(Admin) for an admin session
#[tokio::test]
async fn grants_access_to_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let admin = factory::create_admin(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(admin.id, UserType::Admin)?);
    let user = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert!(user.is_admin());
    assert_eq!(user.id(), admin.id);

    Ok(())
}

/// Super admins log in with their own user type and still pass the admin check.
///
/// Expected: Ok(Admin) with user type SuperAdmin
#[tokio::test]
async fn grants_access_to_super_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let admin = factory::admin::AdminFactory::new(db)
        .super_admin()
        .build()
        .await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(admin.id, UserType::SuperAdmin)?);
    let user = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.user_type(), UserType::SuperAdmin);

    Ok(())
}

/// Expected: Err(AuthError::AccessDenied) for a client
#[tokio::test]
async fn denies_access_to_client() -> Result<(), AppError> {
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
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_)))));

    Ok(())
}
