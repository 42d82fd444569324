use super::*;

fn review(partner_id: i32, client_id: i32, rating: i32) -> CreateReviewParams {
    CreateReviewParams {
        partner_id,
        client_id,
        order_id: None,
        rating,
        comment: Some("Lovely photos".to_string()),
    }
}

/// Tests collecting every rating a partner received.
///
/// Expected: Ok(Vec<i32>) with only that partner's ratings
#[tokio::test]
async fn collects_partner_ratings() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let other = factory::create_partner(db).await?;
    let repo = ReviewRepository::new(db);

    repo.create(&review(partner.id, client.id, 5)).await?;
    repo.create(&review(partner.id, client.id, 3)).await?;
    repo.create(&review(other.id, client.id, 1)).await?;

    let mut ratings = repo.ratings_for_partner(partner.id).await?;
    ratings.sort();

    assert_eq!(ratings, vec![3, 5]);

    Ok(())
}

/// Tests a partner with no reviews.
///
/// Expected: Ok(empty Vec)
#[tokio::test]
async fn empty_without_reviews() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let partner = factory::create_partner(db).await?;

    let ratings = ReviewRepository::new(db).ratings_for_partner(partner.id).await?;

    assert!(ratings.is_empty());

    Ok(())
}
