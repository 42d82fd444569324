use super::*;
use crate::{model::enums::ActivityKind, server::model::client::activity};

/// Tests appending to the activity log.
///
/// Expected: Ok(()) with entries kept in insertion order
#[tokio::test]
async fn appends_in_order() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let client = factory::create_client(db).await?;
    let repo = ClientRepository::new(db);

    repo.append_activity(
        client.id,
        activity(ActivityKind::OrderPlaced, "Placed order Shoot", Some(7)),
    )
    .await?;
    repo.append_activity(
        client.id,
        activity(ActivityKind::ReviewGiven, "Reviewed partner", None),
    )
    .await?;

    let stored = repo.find_by_id(client.id).await?.unwrap();
    assert_eq!(stored.activities.len(), 2);
    assert_eq!(stored.activities[0].kind, ActivityKind::OrderPlaced);
    assert_eq!(stored.activities[0].related_id, Some(7));
    assert_eq!(stored.activities[1].kind, ActivityKind::ReviewGiven);

    Ok(())
}
