use super::*;
use test_utils::factory::admin::AdminFactory;

/// Tests deleting a client that has placed an order.
///
/// Verifies that order history survives an admin delete: the client stays and so does
/// every order row.
///
/// Expected: 409, then the client and its order are still readable
#[tokio::test]
async fn delete_refuses_client_with_orders() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let partner = factory::create_partner(db).await.unwrap();
    let order = factory::create_order(db, client.id, partner.id).await.unwrap();
    let admin = AdminFactory::new(db).super_admin().build().await.unwrap();
    let app = TestApp::new(db);
    let token = app.token(admin.id, UserType::SuperAdmin);

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/clients/{}", client.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .get(&format!("/api/clients/{}", client.id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get(&format!("/api/orders/{}", order.id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["clientId"], client.id);
}

/// Tests deleting a client without orders.
///
/// Expected: 200, then 404 on a second delete
#[tokio::test]
async fn delete_removes_client_without_orders() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let admin = AdminFactory::new(db).super_admin().build().await.unwrap();
    let app = TestApp::new(db);
    let token = app.token(admin.id, UserType::SuperAdmin);
    let uri = format!("/api/clients/{}", client.id);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
