use super::*;

/// Tests that email comparison ignores case.
///
/// Expected: Ok(true)
#[tokio::test]
async fn detects_email_in_any_case() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    ClientFactory::new(db).email("ana@example.com").build().await?;

    let taken = ClientRepository::new(db)
        .is_taken(Some("ANA@Example.com"), None, None)
        .await?;

    assert!(taken);

    Ok(())
}

/// Tests that a client's own values do not count as taken during an update.
///
/// Expected: Ok(false) when excluding the owner, Ok(true) otherwise
#[tokio::test]
async fn excludes_own_account() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = ClientFactory::new(db).username("ana_lens").build().await?;
    let repo = ClientRepository::new(db);

    assert!(!repo.is_taken(None, Some("ana_lens"), Some(client.id)).await?);
    assert!(repo.is_taken(None, Some("ana_lens"), None).await?);

    Ok(())
}

/// Tests a lookup with nothing to compare.
///
/// Expected: Ok(false)
#[tokio::test]
async fn nothing_to_check_is_free() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    factory::create_client(db).await?;

    assert!(!ClientRepository::new(db).is_taken(None, None, None).await?);

    Ok(())
}
