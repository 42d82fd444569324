use super::*;
use crate::server::service::{
    auth::AuthService, partner::PartnerService, seed::SeedService, token::TokenKeys,
};

/// Expected: the sample counts, with creative_lens rated 4.8 and verified
#[tokio::test]
async fn seeds_sample_data() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let summary = SeedService::new(db).run().await?;

    assert_eq!(summary.clients, 2);
    assert_eq!(summary.partners, 2);
    assert_eq!(summary.orders, 2);

    let creative = entity::prelude::Partner::find()
        .all(db)
        .await?
        .into_iter()
        .find(|p| p.username == "creative_lens")
        .unwrap();
    let creative = PartnerService::new(db).get(creative.id).await?.unwrap();
    assert_eq!(creative.ratings.average, 4.8);
    assert_eq!(creative.ratings.total, 42);
    assert!(creative.verified);

    Ok(())
}

/// Seeding twice replaces the data instead of duplicating it, and the sample
/// credentials work.
///
/// Expected: two clients after the second run, admin login succeeds
#[tokio::test]
async fn reseeding_replaces_data() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();
    let service = SeedService::new(db);

    service.run().await?;
    service.run().await?;

    assert_eq!(entity::prelude::Client::find().all(db).await?.len(), 2);
    let orders = entity::prelude::Order::find().all(db).await?;
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().any(|o| o.status == OrderStatus::Completed.as_str()));

    let (_, admin) = AuthService::new(db)
        .login(
            &TokenKeys::new("secret", 1),
            "admin@pixisphere.com",
            "admin123",
            UserType::Admin,
        )
        .await?;
    assert!(admin.is_admin());

    Ok(())
}
