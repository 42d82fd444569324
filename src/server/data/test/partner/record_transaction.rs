use super::*;

fn transaction(kind: TransactionKind, amount: f64) -> TransactionDto {
    TransactionDto {
        kind,
        amount,
        description: "Order payment".to_string(),
        order_id: None,
        date: Utc::now(),
    }
}

/// Tests a payment followed by a refund.
///
/// Verifies that revenue moves by the signed amount and both entries are logged.
///
/// Expected: Ok(()) with revenue back at the starting value
#[tokio::test]
async fn adjusts_revenue_and_logs() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let partner = PartnerFactory::new(db).total_revenue(1000.0).build().await?;
    let repo = PartnerRepository::new(db);

    repo.record_transaction(
        partner.id,
        transaction(TransactionKind::PaymentReceived, 500.0),
        500.0,
    )
    .await?;
    repo.record_transaction(partner.id, transaction(TransactionKind::Refund, 500.0), -500.0)
        .await?;

    let stored = repo.find_by_id(partner.id).await?.unwrap();
    assert_eq!(stored.total_revenue, 1000.0);
    assert_eq!(stored.transactions.len(), 2);
    assert_eq!(stored.transactions[1].kind, TransactionKind::Refund);

    Ok(())
}

/// Tests recording against a partner that does not exist.
///
/// Expected: Ok(()) without error
#[tokio::test]
async fn ignores_missing_partner() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let result = PartnerRepository::new(db)
        .record_transaction(9999, transaction(TransactionKind::PaymentReceived, 10.0), 10.0)
        .await;

    assert!(result.is_ok());

    Ok(())
}
