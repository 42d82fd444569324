use super::*;

/// Tests searching by shoot type.
///
/// Verifies that partners offering the shoot type come back best rated first and that
/// others are excluded.
///
/// Expected: Ok(Vec<Partner>) ordered by rating
#[tokio::test]
async fn orders_matches_by_rating() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let low = PartnerFactory::new(db)
        .shoot_types(["wedding"])
        .rating(3.5, 4)
        .build()
        .await?;
    let high = PartnerFactory::new(db)
        .shoot_types(["wedding", "portrait"])
        .rating(4.9, 12)
        .build()
        .await?;
    PartnerFactory::new(db)
        .shoot_types(["product"])
        .rating(5.0, 2)
        .build()
        .await?;

    let mut filter = FilterDocument::new();
    filter.is_in(
        PartnerField::ShootType,
        vec![FilterValue::text(ShootType::Wedding.as_str())],
    );

    let found = PartnerRepository::new(db).search(&filter, 10).await?;

    let ids: Vec<i32> = found.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![high.id, low.id]);
    assert!(found[0].shoot_types.contains(&ShootType::Portrait));

    Ok(())
}

/// Tests the result cap.
///
/// Expected: Ok(Vec<Partner>) no longer than the limit
#[tokio::test]
async fn respects_limit() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    for _ in 0..3 {
        factory::create_partner(db).await?;
    }

    let found = PartnerRepository::new(db)
        .search(&FilterDocument::new(), 2)
        .await?;

    assert_eq!(found.len(), 2);

    Ok(())
}
