use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests that deleting a client removes their favourites.
///
/// Expected: Ok(true) and no favourites left behind
#[tokio::test]
async fn cascades_to_favourites() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    let repo = ClientRepository::new(db);
    repo.add_favourite(client.id, partner.id).await?;

    assert!(repo.delete(client.id).await?);
    assert!(repo.favourites(client.id).await?.is_empty());
    assert!(!repo.delete(client.id).await?);

    Ok(())
}

/// Tests that the schema refuses to drop a client's orders along with the client.
///
/// Expected: Err(AppError::DbErr) and the order still stored
#[tokio::test]
async fn restricted_by_orders() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let partner = factory::create_partner(db).await?;
    factory::create_order(db, client.id, partner.id).await?;

    let result = ClientRepository::new(db).delete(client.id).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    assert_eq!(entity::prelude::Order::find().count(db).await?, 1);

    Ok(())
}
