//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a client, a partner and an order between them.
///
/// All entities use default values. Use the individual factories to customize.
///
/// # Returns
/// - `Ok((client, partner, order))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_order_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::client::Model,
        entity::partner::Model,
        entity::order::Model,
    ),
    DbErr,
> {
    let client = crate::factory::client::create_client(db).await?;
    let partner = crate::factory::partner::create_partner(db).await?;
    let order = crate::factory::order::create_order(db, client.id, partner.id).await?;

    Ok((client, partner, order))
}
