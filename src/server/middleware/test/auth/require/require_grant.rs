use super::*;

/// Expected: Ok(Admin) when the admin holds the exact grant
#[tokio::test]
async fn grants_access_with_matching_grant() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let admin = factory::admin::AdminFactory::new(db)
        .grant("analytics", "read")
        .build()
        .await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(admin.id, UserType::Admin)?);
    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::AdminGrant(
            PermissionModule::Analytics,
            PermissionAction::Read,
        )])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Expected: Err(AuthError::AccessDenied) when the grant is for another action
#[tokio::test]
async fn denies_access_without_grant() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let admin = factory::admin::AdminFactory::new(db)
        .grant("analytics", "read")
        .build()
        .await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(admin.id, UserType::Admin)?);
    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::AdminGrant(
            PermissionModule::System,
            PermissionAction::Read,
        )])
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_)))));

    Ok(())
}

/// Expected: Ok(Admin) for a super admin without any stored grant
#[tokio::test]
async fn super_admin_bypasses_grants() -> Result<(), AppError> {
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
    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::AdminGrant(
            PermissionModule::System,
            PermissionAction::Delete,
        )])
        .await;

    assert!(result.is_ok());

    Ok(())
}
