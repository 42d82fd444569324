use super::*;
use axum::http::header::CACHE_CONTROL;

/// Tests the health endpoint.
///
/// Expected: status OK with the configured environment
#[tokio::test]
async fn health_reports_environment() {
    let mut test = TestBuilder::new().build().await.unwrap();
    let db = test.database().await.unwrap();
    let app = TestApp::new(db);

    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "test");
}

/// Tests an unknown path.
///
/// Expected: 404 JSON listing available routes
#[tokio::test]
async fn unknown_route_lists_available_routes() {
    let mut test = TestBuilder::new().build().await.unwrap();
    let db = test.database().await.unwrap();
    let app = TestApp::new(db);

    let (status, body) = app.get("/api/nothing-here", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route /api/nothing-here not found");
    assert!(body["availableRoutes"]
        .as_array()
        .unwrap()
        .contains(&json!("GET /api/health")));
}

/// Tests the book catalogue with sorting and pagination.
///
/// Expected: no-cache header and two titles sorted by year
#[tokio::test]
async fn books_are_paginated_and_uncached() {
    let mut test = TestBuilder::new().build().await.unwrap();
    let db = test.database().await.unwrap();
    let app = TestApp::new(db);

    let response = app
        .router()
        .oneshot(request(
            Method::GET,
            "/api/books?sortBy=publishedYear&sortOrder=asc&limit=2",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let years: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["publishedYear"].as_i64().unwrap())
        .collect();
    assert_eq!(years.len(), 2);
    assert!(years[0] <= years[1]);
    assert_eq!(body["pagination"]["totalCount"], 5);
}

/// Tests a page number far past the end of the catalogue.
///
/// Expected: 200 with empty data and the full catalogue count
#[tokio::test]
async fn books_huge_page_is_empty() {
    let mut test = TestBuilder::new().build().await.unwrap();
    let db = test.database().await.unwrap();
    let app = TestApp::new(db);

    let (status, body) = app
        .get("/api/books?page=1000000000000000000&limit=100", None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["totalCount"], 5);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

/// Tests writing to the catalogue.
///
/// Expected: 501
#[tokio::test]
async fn book_creation_is_not_implemented() {
    let mut test = TestBuilder::new().build().await.unwrap();
    let db = test.database().await.unwrap();
    let app = TestApp::new(db);

    let (status, _) = app
        .send(Method::POST, "/api/books", None, Some(json!({ "title": "New" })))
        .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

/// Tests the admin dashboard and system health endpoints over seeded data.
///
/// Expected: seeded counts and a connected database
#[tokio::test]
async fn admin_reports_over_seeded_data() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    crate::server::service::seed::SeedService::new(db)
        .run()
        .await
        .unwrap();
    let admin = factory::create_admin(db).await.unwrap();
    let app = TestApp::new(db);
    let token = app.token(admin.id, UserType::Admin);

    let (status, body) = app.get("/api/admins/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["overview"]["totalClients"], 2);
    assert_eq!(body["data"]["overview"]["verifiedPartners"], 2);
    assert_eq!(body["data"]["overview"]["completedOrders"], 1);
    assert_eq!(body["data"]["systemHealth"]["database"], "connected");

    let (status, body) = app.get("/api/admins/system-health", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"]["status"], "connected");

    let (status, body) = app.get("/api/admins/analytics?period=2w", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_errors(&body), vec!["period".to_string()]);
}
