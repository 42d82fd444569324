use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Client, Partner};
///
/// let test = TestBuilder::new()
///     .with_table(Client)
///     .with_table(Partner)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the entity using SQLite syntax. Tables with
    /// foreign keys should be added after the tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the client and partner tables along with every partner child table.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_account_tables(self) -> Self {
        self.with_table(Client)
            .with_table(Partner)
            .with_table(ClientFavouritePartner)
            .with_table(PartnerShootType)
            .with_table(PartnerSpecialization)
            .with_table(PartnerLocation)
            .with_table(PartnerPackage)
            .with_table(PartnerBlackoutDate)
    }

    /// Adds every table in the marketplace schema in dependency order.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_marketplace_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_marketplace_tables(self) -> Self {
        self.with_account_tables()
            .with_table(Order)
            .with_table(PartnerReview)
            .with_table(Admin)
            .with_table(AdminPermission)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
