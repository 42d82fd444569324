use super::*;
use test_utils::factory::partner::PartnerFactory;

/// Tests the first page of a partner listing.
///
/// Expected: two items and pagination describing three partners over two pages
#[tokio::test]
async fn paginates_partners() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    for _ in 0..3 {
        factory::create_partner(db).await.unwrap();
    }
    let app = TestApp::new(db);

    let (status, body) = app.get("/api/partners?limit=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["totalCount"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNextPage"], true);
    assert_eq!(body["pagination"]["hasPrevPage"], false);
}

/// Tests requesting a page beyond the last one.
///
/// Expected: empty data with hasNextPage false
#[tokio::test]
async fn page_past_end_is_empty() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    factory::create_partner(db).await.unwrap();
    let app = TestApp::new(db);

    let (status, body) = app.get("/api/partners?page=5&limit=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["currentPage"], 5);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

/// Tests sorting partners by day rate.
///
/// Expected: prices in ascending order
#[tokio::test]
async fn sorts_by_price_ascending() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    for price in [3000.0, 1000.0, 2000.0] {
        PartnerFactory::new(db).price_per_day(price).build().await.unwrap();
    }
    let app = TestApp::new(db);

    let (status, body) = app
        .get("/api/partners?sortBy=pricePerDay&sortOrder=asc", None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let prices: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["pricePerDay"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![1000.0, 2000.0, 3000.0]);
}

/// Tests that accepted filters are echoed and applied.
///
/// Expected: only the Delhi partner, with `city` echoed under filters
#[tokio::test]
async fn echoes_accepted_filters() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    PartnerFactory::new(db).city("Delhi").build().await.unwrap();
    PartnerFactory::new(db).city("Mumbai").build().await.unwrap();
    let app = TestApp::new(db);

    let (status, body) = app.get("/api/partners?city=delhi", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["filters"]["city"], "delhi");
}

/// Tests rejection of out-of-range and unknown listing parameters.
///
/// Expected: 400 naming every invalid field
#[tokio::test]
async fn rejects_invalid_listing_parameters() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let app = TestApp::new(db);

    let (status, body) = app
        .get("/api/partners?limit=0&sortBy=bogus&minRating=7", None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let fields = field_errors(&body);
    assert!(fields.contains(&"limit".to_string()));
    assert!(fields.contains(&"sortBy".to_string()));
    assert!(fields.contains(&"minRating".to_string()));
}

/// Tests the public search after seeding sample data.
///
/// Expected: creative_lens found for fashion shoots with its 4.8 rating
#[tokio::test]
async fn search_finds_seeded_partner() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    crate::server::service::seed::SeedService::new(db)
        .run()
        .await
        .unwrap();
    let app = TestApp::new(db);

    let (status, body) = app.get("/api/partners/search?shootType=fashion", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    let partner = &body["data"]["partners"][0];
    assert_eq!(partner["username"], "creative_lens");
    assert_eq!(partner["ratings"]["average"], 4.8);
    assert_eq!(body["data"]["searchCriteria"]["radius"], 50);
    assert_eq!(body["data"]["searchCriteria"]["shootType"], json!(["fashion"]));
}

/// Tests the admin-only client listing from a client account.
///
/// Expected: 403 for the client, 200 for an admin
#[tokio::test]
async fn client_listing_requires_admin() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    let client = factory::create_client(db).await.unwrap();
    let admin = factory::create_admin(db).await.unwrap();
    let app = TestApp::new(db);

    let client_token = app.token(client.id, UserType::Client);
    let (status, _) = app.get("/api/clients", Some(&client_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = app.token(admin.id, UserType::Admin);
    let (status, body) = app.get("/api/clients", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["totalCount"], 1);
}

/// Tests the top-rated verified partner over the seeded data.
///
/// Expected: exactly creative_lens, the 4.8 rated partner, out of two verified partners
#[tokio::test]
async fn top_rated_verified_partner() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    crate::server::service::seed::SeedService::new(db)
        .run()
        .await
        .unwrap();
    let app = TestApp::new(db);

    let (status, body) = app
        .get(
            "/api/partners?verified=true&sortBy=ratings.average&sortOrder=desc&limit=1",
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["username"], "creative_lens");
    assert_eq!(body["pagination"]["totalCount"], 2);
    assert_eq!(body["filters"]["verified"], true);
}

/// Tests the second page over more rows than fit on one.
///
/// Expected: day rates 11 through 20 of 25 partners, with pages on both sides
#[tokio::test]
async fn second_page_holds_next_records() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    for price in 1..=25 {
        PartnerFactory::new(db)
            .price_per_day(price as f64)
            .build()
            .await
            .unwrap();
    }
    let app = TestApp::new(db);

    let (status, body) = app
        .get("/api/partners?page=2&limit=10&sortBy=pricePerDay&sortOrder=asc", None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let prices: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["pricePerDay"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, (11..=20).map(f64::from).collect::<Vec<_>>());
    assert_eq!(body["pagination"]["totalCount"], 25);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["hasNextPage"], true);
    assert_eq!(body["pagination"]["hasPrevPage"], true);
}

/// Tests a page number far past any offset the database can skip.
///
/// Expected: 200 with empty data and the requested page echoed
#[tokio::test]
async fn huge_page_is_empty() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    factory::create_partner(db).await.unwrap();
    let app = TestApp::new(db);

    let (status, body) = app
        .get("/api/partners?page=1000000000000000000&limit=100", None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["totalCount"], 1);
    assert_eq!(body["pagination"]["currentPage"], 1_000_000_000_000_000_000u64);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

/// Tests free-text search across partner fields and child tables.
///
/// Expected: company name, shoot type and city terms each find the one seeded partner
/// they belong to
#[tokio::test]
async fn search_matches_text_fields() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    crate::server::service::seed::SeedService::new(db)
        .run()
        .await
        .unwrap();
    let app = TestApp::new(db);

    for (term, username) in [
        ("LENS", "creative_lens"),
        ("wedd", "photo_pro"),
        ("delhi", "creative_lens"),
    ] {
        let (status, body) = app.get(&format!("/api/partners?search={term}"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["totalCount"], 1, "search {term}");
        assert_eq!(body["data"][0]["username"], username);
    }

    let (_, body) = app.get("/api/partners?search=nothing-like-this", None).await;
    assert_eq!(body["data"], json!([]));
}

/// Tests that a lowercase filter term finds an accented company name.
///
/// Expected: "Étoile Studio" found by both "Étoile" and "étoile"
#[tokio::test]
async fn company_name_filter_folds_accents() {
    let mut test = TestBuilder::new().with_marketplace_tables().build().await.unwrap();
    let db = test.database().await.unwrap();
    PartnerFactory::new(db)
        .company_name("Étoile Studio")
        .build()
        .await
        .unwrap();
    let app = TestApp::new(db);

    for term in ["%C3%89toile", "%C3%A9toile"] {
        let (status, body) = app
            .get(&format!("/api/partners?companyName={term}"), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["totalCount"], 1, "companyName {term}");
    }
}
