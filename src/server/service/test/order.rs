use super::*;
use crate::{
    model::enums::{
        ActivityKind, CurrentStage, GroupBy, OrderSort, PaymentStatus, TransactionKind,
    },
    server::{
        filter::order::OrderFilterParams,
        model::{
            listing::ListQuery,
            order::{CreateOrderParams, OrderState, Pricing},
        },
        service::{client::ClientService, order::OrderService, partner::PartnerService},
    },
};

fn order_params(client_id: i32, partner_id: i32, base_price: f64) -> CreateOrderParams {
    CreateOrderParams {
        order_name: "Engagement shoot".to_string(),
        client_id,
        partner_id,
        event: Default::default(),
        event_date_time: Utc::now() + Duration::days(14),
        location: Default::default(),
        pricing: Pricing::compute(base_price, Vec::new(), 0.0, None, Some(10.0), None),
        special_instructions: None,
        data_providing_method: Default::default(),
    }
}

/// Expected: Ok with a pending order, server-side total and an order_placed activity
#[tokio::test]
async fn creates_pending_order() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;

    let order = OrderService::new(db)
        .create(order_params(client.id, partner.id, 1000.0))
        .await?;

    assert_eq!(order.state, OrderState::Pending);
    assert_eq!(order.pricing.total_amount, 1100.0);
    assert!(order.order_code.starts_with("ORD_"));

    let detail = ClientService::new(db).get_detail(client.id).await?.unwrap();
    assert_eq!(detail.client.activities[0].kind, ActivityKind::OrderPlaced);
    assert_eq!(detail.client.activities[0].related_id, Some(order.id));

    Ok(())
}

/// Expected: Err(AppError::NotFound) when the partner does not exist
#[tokio::test]
async fn create_requires_existing_partner() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;

    let result = OrderService::new(db)
        .create(order_params(client.id, 999, 1000.0))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Completing credits the partner; refunding afterwards debits it again.
///
/// Expected: revenue 500 after completion, 0 after refund, payment marked refunded
#[tokio::test]
async fn completion_and_refund_update_partner_revenue() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let order = factory::order::OrderFactory::new(db, client.id, partner.id)
        .amount(500.0)
        .state("in_progress", Some("delivery"), 90)
        .build()
        .await?;
    let service = OrderService::new(db);

    let completed = service
        .update_status(order.id, OrderStatus::Completed, None)
        .await?
        .unwrap();
    assert_eq!(completed.state, OrderState::Completed);
    assert_eq!(completed.state.progress(), 100);

    let credited = PartnerService::new(db).get(partner.id).await?.unwrap();
    assert_eq!(credited.total_revenue, 500.0);
    assert_eq!(credited.transactions[0].kind, TransactionKind::PaymentReceived);

    let refunded = service
        .update_status(order.id, OrderStatus::Refunded, None)
        .await?
        .unwrap();
    assert_eq!(refunded.payment_status, PaymentStatus::Refunded);

    let debited = PartnerService::new(db).get(partner.id).await?.unwrap();
    assert_eq!(debited.total_revenue, 0.0);
    assert_eq!(debited.transactions.len(), 2);
    assert_eq!(debited.transactions[1].amount, -500.0);

    Ok(())
}

/// Expected: Err(AppError::Conflict) and the stored status unchanged
#[tokio::test]
async fn rejects_illegal_transition() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let order = factory::create_order(db, client.id, partner.id).await?;
    let service = OrderService::new(db);

    let result = service
        .update_status(order.id, OrderStatus::Completed, None)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let stored = service.get(order.id).await?.unwrap();
    assert_eq!(stored.state, OrderState::Pending);

    Ok(())
}

/// Expected: Ok with the shoot_day stage and 50 percent progress
#[tokio::test]
async fn jumps_to_requested_stage() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let order = factory::order::OrderFactory::new(db, client.id, partner.id)
        .state("confirmed", Some("booking_confirmed"), 10)
        .build()
        .await?;

    let updated = OrderService::new(db)
        .update_status(order.id, OrderStatus::InProgress, Some(CurrentStage::ShootDay))
        .await?
        .unwrap();

    assert_eq!(updated.state.current_stage(), Some(CurrentStage::ShootDay));
    assert_eq!(updated.state.progress(), 50);

    Ok(())
}

/// The summary covers every matching order, not only the requested page.
///
/// Expected: one order on the page, totals over three
#[tokio::test]
async fn list_summary_spans_all_pages() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    for amount in [100.0, 200.0, 300.0] {
        factory::order::OrderFactory::new(db, client.id, partner.id)
            .amount(amount)
            .build()
            .await?;
    }

    let query = ListQuery::<OrderSort> {
        limit: 1,
        ..Default::default()
    };
    let (page, summary) = OrderService::new(db)
        .list(&OrderFilterParams::default(), &query)
        .await?;

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 3);
    assert_eq!(summary.total_revenue, 600.0);
    assert_eq!(summary.average_order_value, 200.0);

    Ok(())
}

/// Expected: one bucket per creation month within the range
#[tokio::test]
async fn analytics_groups_by_creation_period() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let now = Utc::now();
    factory::order::OrderFactory::new(db, client.id, partner.id)
        .created_at(now - Duration::days(400))
        .build()
        .await?;
    factory::create_order(db, client.id, partner.id).await?;
    factory::create_order(db, client.id, partner.id).await?;

    let stats = OrderService::new(db)
        .analytics(Some(now - Duration::days(30)), None, GroupBy::Year)
        .await?;

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].total_orders, 2);
    assert_eq!(stats[0].status_breakdown[0].status, OrderStatus::Pending);

    Ok(())
}
