//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request handler
//! through Axum's state extraction. It holds:
//! - Database connection pool for data persistence
//! - Keys for issuing and verifying self-issued tokens
//! - The optional external identity token verifier
//! - Environment name and process start time for health reporting

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    service::token::{IdentityVerifier, TokenKeys},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `DatabaseConnection` is a pool handle and the token
/// material sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Signing and verification keys for self-issued tokens.
    pub tokens: Arc<TokenKeys>,

    /// Verifier for tokens from the external identity provider.
    ///
    /// `None` when no identity provider is configured; such tokens are then rejected.
    pub identity: Option<Arc<IdentityVerifier>>,

    /// Deployment environment name reported by the health endpoint.
    pub app_env: String,

    /// Process start time used to report uptime.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates a new application state from a connected database and loaded configuration.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Loaded configuration providing token secrets and the environment name
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenKeys::new(&config.jwt_secret, config.jwt_expiry_hours)),
            identity: config
                .identity
                .as_ref()
                .map(|identity| Arc::new(IdentityVerifier::new(identity))),
            app_env: config.app_env.clone(),
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over a test database, accepting identity tokens minted by the token test helpers.
    pub fn for_tests(db: DatabaseConnection) -> Self {
        use crate::server::service::token::tests::identity_config;

        Self {
            db,
            tokens: Arc::new(TokenKeys::new("test-session-secret", 24)),
            identity: Some(Arc::new(IdentityVerifier::new(&identity_config()))),
            app_env: "test".to_string(),
            started_at: Utc::now(),
        }
    }
}
