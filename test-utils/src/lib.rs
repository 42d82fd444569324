//! Pixisphere Test Utils
//!
//! Shared testing utilities for the marketplace API. Provides a builder for creating test
//! contexts backed by in-memory SQLite databases, plus factories that insert entities with
//! sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories (clients, partners, orders, admins)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn lists_partners() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_marketplace_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
