use super::*;

/// Expected: Ok(Client) when the client asks for their own record
#[tokio::test]
async fn grants_access_to_self() -> Result<(), AppError> {
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
        .require(&[Permission::SelfOrAdmin(UserType::Client, client.id)])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Expected: Err(AuthError::AccessDenied) when a client asks for another client
#[tokio::test]
async fn denies_access_to_other_client() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let other = factory::create_client(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(client.id, UserType::Client)?);
    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, other.id)])
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_)))));

    Ok(())
}

/// A partner whose id matches a client's id is still a different account.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn same_id_in_other_collection_is_not_self() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    assert_eq!(client.id, partner.id);
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(partner.id, UserType::Partner)?);
    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, client.id)])
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_)))));

    Ok(())
}

/// Expected: Ok(Admin) for an admin looking at any client
#[tokio::test]
async fn grants_access_to_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let admin = factory::create_admin(db).await?;
    let state = AppState::for_tests(db.clone());

    let headers = bearer(&state.tokens.issue(admin.id, UserType::Admin)?);
    let result = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, client.id)])
        .await;

    assert!(result.is_ok());

    Ok(())
}
