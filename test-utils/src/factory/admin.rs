//! Admin factory for creating test admin accounts with permission grants.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test admins.
///
/// # Example
///
/// ```rust,ignore
/// let admin = AdminFactory::new(&db)
///     .grant("orders", "read")
///     .build()
///     .await?;
/// ```
pub struct AdminFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    email: String,
    identity_uid: Option<String>,
    password_hash: Option<String>,
    role: String,
    is_active: bool,
    grants: Vec<(String, String)>,
}

impl<'a> AdminFactory<'a> {
    /// Creates a new AdminFactory with default values.
    ///
    /// Defaults:
    /// - username: `"admin_{id}"`
    /// - role: `"Admin"`, active, no grants
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: format!("admin_{}", id),
            email: format!("admin_{}@example.com", id),
            identity_uid: None,
            password_hash: None,
            role: "Admin".to_string(),
            is_active: true,
            grants: Vec::new(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn identity_uid(mut self, uid: impl Into<String>) -> Self {
        self.identity_uid = Some(uid.into());
        self
    }

    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Makes the admin a `SuperAdmin`.
    pub fn super_admin(mut self) -> Self {
        self.role = "SuperAdmin".to_string();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Adds a (module, action) permission grant.
    pub fn grant(mut self, module: impl Into<String>, action: impl Into<String>) -> Self {
        self.grants.push((module.into(), action.into()));
        self
    }

    /// Builds and inserts the admin and its grants.
    ///
    /// # Returns
    /// - `Ok(entity::admin::Model)` - Created admin
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::admin::Model, DbErr> {
        let now = Utc::now();
        let admin = entity::admin::ActiveModel {
            admin_code: ActiveValue::Set(format!("ADM_TEST_{}", next_id())),
            identity_uid: ActiveValue::Set(self.identity_uid),
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            phone_no: ActiveValue::Set(None),
            role: ActiveValue::Set(self.role),
            content: ActiveValue::Set(serde_json::json!({})),
            is_active: ActiveValue::Set(self.is_active),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (module, action) in self.grants {
            entity::admin_permission::ActiveModel {
                admin_id: ActiveValue::Set(admin.id),
                module: ActiveValue::Set(module),
                action: ActiveValue::Set(action),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(admin)
    }
}

/// Creates an active `Admin` with no grants.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::admin::Model, DbErr> {
    AdminFactory::new(db).build().await
}
