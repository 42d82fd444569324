use super::*;

/// Expected: Ok for the order's client and partner, AccessDenied for anyone else
#[tokio::test]
async fn only_participants_pass() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let outsider = factory::create_partner(db).await?;
    let state = AppState::for_tests(db.clone());

    let permission = [Permission::OrderParticipant {
        client_id: client.id,
        partner_id: partner.id,
    }];

    let client_headers = bearer(&state.tokens.issue(client.id, UserType::Client)?);
    assert!(AuthGuard::new(&state, &client_headers)
        .require(&permission)
        .await
        .is_ok());

    let partner_headers = bearer(&state.tokens.issue(partner.id, UserType::Partner)?);
    assert!(AuthGuard::new(&state, &partner_headers)
        .require(&permission)
        .await
        .is_ok());

    let outsider_headers = bearer(&state.tokens.issue(outsider.id, UserType::Partner)?);
    assert!(matches!(
        AuthGuard::new(&state, &outsider_headers)
            .require(&permission)
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));

    Ok(())
}
