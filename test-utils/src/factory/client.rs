//! Client factory for creating test client accounts.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test clients with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let client = ClientFactory::new(&db)
///     .username("john_doe")
///     .city("New York")
///     .plan_type("premium")
///     .build()
///     .await?;
/// ```
pub struct ClientFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    email: String,
    identity_uid: Option<String>,
    password_hash: Option<String>,
    city: Option<String>,
    state: Option<String>,
    plan_type: String,
    is_active: bool,
    is_verified: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> ClientFactory<'a> {
    /// Creates a new ClientFactory with default values.
    ///
    /// Defaults:
    /// - username: `"client_{id}"`
    /// - email: `"client_{id}@example.com"`
    /// - plan_type: `"free"`
    /// - is_active: `true`, is_verified: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: format!("client_{}", id),
            email: format!("client_{}@example.com", id),
            identity_uid: None,
            password_hash: None,
            city: None,
            state: None,
            plan_type: "free".to_string(),
            is_active: true,
            is_verified: false,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn identity_uid(mut self, uid: impl Into<String>) -> Self {
        self.identity_uid = Some(uid.into());
        self
    }

    /// Sets an already hashed password.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn plan_type(mut self, plan_type: impl Into<String>) -> Self {
        self.plan_type = plan_type.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn verified(mut self, is_verified: bool) -> Self {
        self.is_verified = is_verified;
        self
    }

    pub fn last_login(mut self, last_login: DateTime<Utc>) -> Self {
        self.last_login = Some(last_login);
        self
    }

    /// Overrides the creation timestamp, useful for ordering and date range tests.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the client into the database.
    ///
    /// # Returns
    /// - `Ok(entity::client::Model)` - Created client
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::client::Model, DbErr> {
        entity::client::ActiveModel {
            client_code: ActiveValue::Set(format!("CLI_TEST_{}", next_id())),
            identity_uid: ActiveValue::Set(self.identity_uid),
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            phone_no: ActiveValue::Set("+1234567890".to_string()),
            profile_pic_url: ActiveValue::Set(None),
            street: ActiveValue::Set(None),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(self.state),
            country: ActiveValue::Set(None),
            zip_code: ActiveValue::Set(None),
            plan_type: ActiveValue::Set(self.plan_type),
            plan_start: ActiveValue::Set(None),
            plan_end: ActiveValue::Set(None),
            activities: ActiveValue::Set(serde_json::json!([])),
            is_active: ActiveValue::Set(self.is_active),
            is_verified: ActiveValue::Set(self.is_verified),
            last_login: ActiveValue::Set(self.last_login),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a client with default values.
///
/// Shorthand for `ClientFactory::new(db).build().await`.
pub async fn create_client(db: &DatabaseConnection) -> Result<entity::client::Model, DbErr> {
    ClientFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_client_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Client).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let client = create_client(db).await?;

        assert!(client.username.starts_with("client_"));
        assert_eq!(client.plan_type, "free");
        assert!(client.is_active);
        assert!(!client.is_verified);

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_clients() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Client).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_client(db).await?;
        let second = create_client(db).await?;

        assert_ne!(first.email, second.email);
        assert_ne!(first.client_code, second.client_code);

        Ok(())
    }
}
