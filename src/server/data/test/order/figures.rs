use super::*;

/// Tests loading figures for one partner's orders.
///
/// Expected: Ok(Vec<OrderFigure>) covering only that partner, with parsed statuses
#[tokio::test]
async fn returns_figures_for_matching_orders() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let other = factory::create_partner(db).await?;

    OrderFactory::new(db, client.id, partner.id)
        .amount(1200.0)
        .state("completed", Some("completed"), 100)
        .build()
        .await?;
    OrderFactory::new(db, client.id, partner.id)
        .amount(800.0)
        .build()
        .await?;
    OrderFactory::new(db, client.id, other.id)
        .amount(5000.0)
        .build()
        .await?;

    let mut filter = FilterDocument::new();
    filter.equals(
        OrderField::PartnerId,
        Some(FilterValue::Int(partner.id as i64)),
    );

    let mut figures = OrderRepository::new(db).figures(&filter).await?;
    figures.sort_by(|a, b| a.total_amount.total_cmp(&b.total_amount));

    assert_eq!(figures.len(), 2);
    assert_eq!(figures[0].status, OrderStatus::Pending);
    assert_eq!(figures[1].status, OrderStatus::Completed);
    assert_eq!(figures[1].total_amount, 1200.0);

    Ok(())
}

/// Tests that a stored status outside the known set is reported instead of skipped.
///
/// Expected: Err(AppError::InternalError)
#[tokio::test]
async fn rejects_unknown_stored_status() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    OrderFactory::new(db, client.id, partner.id)
        .state("archived", None, 0)
        .build()
        .await?;

    let result = OrderRepository::new(db).figures(&FilterDocument::new()).await;

    assert!(matches!(result, Err(AppError::InternalError(_))));

    Ok(())
}
