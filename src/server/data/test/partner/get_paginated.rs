use super::*;

/// Tests filtering partners by city and minimum price.
///
/// Verifies that child table clauses and column comparisons combine, and that the total
/// counts every match rather than the page.
///
/// Expected: Ok(Page) with the one Delhi partner above the price floor
#[tokio::test]
async fn filters_by_city_and_price() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let expected = PartnerFactory::new(db)
        .city("Delhi")
        .price_per_day(20000.0)
        .build()
        .await?;
    PartnerFactory::new(db)
        .city("Delhi")
        .price_per_day(5000.0)
        .build()
        .await?;
    PartnerFactory::new(db)
        .city("Mumbai")
        .price_per_day(30000.0)
        .build()
        .await?;

    let mut filter = FilterDocument::new();
    filter
        .contains(PartnerField::City, Some("delhi"))
        .gte(PartnerField::PricePerDay, Some(FilterValue::Float(10000.0)));

    let page = PartnerRepository::new(db)
        .get_paginated(&filter, &ListQuery::default())
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, expected.id);
    assert_eq!(page.items[0].locations[0].city, "Delhi");

    Ok(())
}

/// Tests that equal sort keys never repeat a partner across pages.
///
/// Expected: Ok(Page) twice, disjoint and together covering every partner
#[tokio::test]
async fn pages_do_not_overlap_on_ties() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    for _ in 0..4 {
        PartnerFactory::new(db).price_per_day(1000.0).build().await?;
    }

    let repo = PartnerRepository::new(db);
    let filter = FilterDocument::new();
    let mut query = ListQuery {
        limit: 2,
        sort_by: Some(PartnerSort::PricePerDay),
        sort_order: SortOrder::Asc,
        ..ListQuery::default()
    };

    let first = repo.get_paginated(&filter, &query).await?;
    query.page = 2;
    let second = repo.get_paginated(&filter, &query).await?;

    let mut ids: Vec<i32> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|p| p.id)
        .collect();
    ids.dedup();

    assert_eq!(first.total, 4);
    assert_eq!(ids.len(), 4);
    assert!(first.items[1].id < second.items[0].id);

    Ok(())
}

/// Tests that substring filters fold the case of accented letters.
///
/// Verifies that a lowercase term with a non-ASCII letter finds a company name written
/// with the uppercase form, and that LIKE wildcards in a term match literally.
///
/// Expected: Ok(Page) with the one "Étoile Studio" partner for "étoile", none for "%"
#[tokio::test]
async fn contains_folds_unicode_case() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let expected = PartnerFactory::new(db)
        .company_name("Étoile Studio")
        .build()
        .await?;
    PartnerFactory::new(db)
        .company_name("Etoile Films")
        .build()
        .await?;

    let repo = PartnerRepository::new(db);
    for term in ["étoile", "ÉTOILE", "Étoile"] {
        let mut filter = FilterDocument::new();
        filter.contains(PartnerField::CompanyName, Some(term));

        let page = repo.get_paginated(&filter, &ListQuery::default()).await?;

        assert_eq!(page.total, 1, "term {term}");
        assert_eq!(page.items[0].id, expected.id);
    }

    let mut filter = FilterDocument::new();
    filter.contains(PartnerField::CompanyName, Some("%"));
    let page = repo.get_paginated(&filter, &ListQuery::default()).await?;
    assert_eq!(page.total, 0);

    Ok(())
}
