use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection,
};

use crate::error::TestError;

/// Per-test handle on a private in-memory SQLite database.
pub struct TestContext {
    /// Connected on first call to [`TestContext::database`].
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    pub fn new() -> Self {
        Self { db: None }
    }

    /// Returns the connection, opening the in-memory database on first use.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Connection to this test's database
    /// - `Err(TestError::Database)` - SQLite could not be opened
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        let db = match self.db.take() {
            Some(db) => db,
            None => {
                let mut opt = ConnectOptions::new("sqlite::memory:");
                opt.sqlx_logging(false);
                Database::connect(opt).await?
            }
        };

        Ok(&*self.db.insert(db))
    }

    /// Runs the marketplace `CREATE TABLE` statements in dependency order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
