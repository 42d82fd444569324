use super::*;

/// Tests writing a confirmed state.
///
/// Verifies that status, stage and progress are written together and payment status is
/// left alone when not given.
///
/// Expected: Ok(Order) confirmed at 10 percent with payment still pending
#[tokio::test]
async fn writes_lifecycle_columns_together() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let order = factory::create_order(db, client.id, partner.id).await?;

    let updated = OrderRepository::new(db)
        .set_state(order.id, OrderState::Confirmed, None)
        .await?;

    assert_eq!(updated.state.status(), OrderStatus::Confirmed);
    assert_eq!(updated.state.current_stage(), Some(CurrentStage::BookingConfirmed));
    assert_eq!(updated.state.progress(), 10);
    assert_eq!(updated.payment_status, PaymentStatus::Pending);

    Ok(())
}

/// Tests completing an order together with its payment.
///
/// Expected: Ok(Order) completed at 100 percent with payment completed
#[tokio::test]
async fn sets_payment_status_when_given() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let order = factory::create_order(db, client.id, partner.id).await?;

    let updated = OrderRepository::new(db)
        .set_state(order.id, OrderState::Completed, Some(PaymentStatus::Completed))
        .await?;

    assert_eq!(updated.state.status(), OrderStatus::Completed);
    assert_eq!(updated.state.progress(), 100);
    assert_eq!(updated.payment_status, PaymentStatus::Completed);

    Ok(())
}
