use super::*;
use test_utils::factory::order::OrderFactory;

fn order_body(partner_id: i32) -> Value {
    json!({
        "orderName": "Engagement Shoot",
        "partnerId": partner_id,
        "eventDateTime": "2030-05-01T10:00:00Z",
        "pricing": { "basePrice": 1000.0, "taxPercentage": 10.0 }
    })
}

/// Tests a client placing an order for themselves.
///
/// Expected: 201 pending order with the tax included in the total
#[tokio::test]
async fn client_places_order() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let partner = factory::create_partner(db).await.unwrap();
    let app = TestApp::new(db);
    let token = app.token(client.id, UserType::Client);

    let (status, body) = app
        .send(Method::POST, "/api/orders", Some(&token), Some(order_body(partner.id)))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["clientId"], client.id);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["pricing"]["totalAmount"], 1100.0);
}

/// Tests ordering from a partner that does not exist.
///
/// Expected: 404
#[tokio::test]
async fn order_for_missing_partner_is_not_found() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let app = TestApp::new(db);
    let token = app.token(client.id, UserType::Client);

    let (status, _) = app
        .send(Method::POST, "/api/orders", Some(&token), Some(order_body(9999)))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tests a partner trying to place an order.
///
/// Expected: 403
#[tokio::test]
async fn partner_cannot_place_order() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let partner = factory::create_partner(db).await.unwrap();
    let app = TestApp::new(db);
    let token = app.token(partner.id, UserType::Partner);

    let (status, _) = app
        .send(Method::POST, "/api/orders", Some(&token), Some(order_body(partner.id)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// Tests order visibility for parties and outsiders.
///
/// Expected: 200 for the client and partner, 403 for another client
#[tokio::test]
async fn order_visible_to_participants_only() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let other = factory::create_client(db).await.unwrap();
    let partner = factory::create_partner(db).await.unwrap();
    let order = factory::create_order(db, client.id, partner.id).await.unwrap();
    let app = TestApp::new(db);
    let uri = format!("/api/orders/{}", order.id);

    let (status, _) = app
        .get(&uri, Some(&app.token(client.id, UserType::Client)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get(&uri, Some(&app.token(partner.id, UserType::Partner)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get(&uri, Some(&app.token(other.id, UserType::Client)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// Tests status changes through the state machine.
///
/// Expected: pending to confirmed succeeds, confirmed back to pending is a 409
#[tokio::test]
async fn status_follows_lifecycle() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let partner = factory::create_partner(db).await.unwrap();
    let order = factory::create_order(db, client.id, partner.id).await.unwrap();
    let app = TestApp::new(db);
    let token = app.token(partner.id, UserType::Partner);
    let uri = format!("/api/orders/{}/status", order.id);

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "status": "confirmed" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["progress"]["currentStage"], "booking_confirmed");

    let (status, _) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "status": "pending" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

/// Tests the admin order listing summary.
///
/// Expected: revenue and average over every matching order, not just the returned page,
/// and a status breakdown
#[tokio::test]
async fn order_listing_includes_summary() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let partner = factory::create_partner(db).await.unwrap();
    let admin = factory::create_admin(db).await.unwrap();
    OrderFactory::new(db, client.id, partner.id)
        .amount(500.0)
        .state("completed", Some("completed"), 100)
        .build()
        .await
        .unwrap();
    OrderFactory::new(db, client.id, partner.id)
        .amount(300.0)
        .build()
        .await
        .unwrap();
    let app = TestApp::new(db);
    let token = app.token(admin.id, UserType::Admin);

    let (status, body) = app.get("/api/orders?limit=1", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["summary"]["totalRevenue"], 800.0);
    assert_eq!(body["summary"]["averageOrderValue"], 400.0);
    assert_eq!(body["summary"]["statusBreakdown"].as_array().unwrap().len(), 2);
}
