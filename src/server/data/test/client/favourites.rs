use super::*;

/// Tests adding the same favourite twice.
///
/// Expected: Ok(true) then Ok(false), with one stored favourite
#[tokio::test]
async fn add_is_idempotent() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let repo = ClientRepository::new(db);

    assert!(repo.add_favourite(client.id, partner.id).await?);
    assert!(!repo.add_favourite(client.id, partner.id).await?);

    let favourites = repo.favourites(client.id).await?;
    assert_eq!(favourites.len(), 1);
    assert_eq!(favourites[0].0, partner.id);

    Ok(())
}

/// Tests removing a favourite that was never added.
///
/// Expected: Ok(false)
#[tokio::test]
async fn remove_reports_absence() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let repo = ClientRepository::new(db);

    assert!(!repo.remove_favourite(client.id, partner.id).await?);

    repo.add_favourite(client.id, partner.id).await?;
    assert!(repo.remove_favourite(client.id, partner.id).await?);
    assert!(repo.favourites(client.id).await?.is_empty());

    Ok(())
}
