//! Admin data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{
    model::enums::{AdminRole, PermissionAction, PermissionModule},
    server::{error::AppError, model::admin::Admin, util::code::generate_code},
};

/// Fields of a new admin account.
#[derive(Debug, Clone)]
pub struct CreateAdminParams {
    pub username: String,
    pub email: String,
    pub phone_no: Option<String>,
    pub role: AdminRole,
    pub grants: Vec<(PermissionModule, PermissionAction)>,
}

/// Repository providing database operations for admins and their grants.
pub struct AdminRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an admin with a fresh `ADM_` code, then one row per grant.
    pub async fn create(
        &self,
        params: &CreateAdminParams,
        password_hash: Option<String>,
    ) -> Result<Admin, AppError> {
        let now = Utc::now();
        let entity = entity::admin::ActiveModel {
            admin_code: ActiveValue::Set(generate_code("ADM")),
            identity_uid: ActiveValue::Set(None),
            username: ActiveValue::Set(params.username.clone()),
            email: ActiveValue::Set(params.email.to_lowercase()),
            password_hash: ActiveValue::Set(password_hash),
            phone_no: ActiveValue::Set(params.phone_no.clone()),
            role: ActiveValue::Set(params.role.to_string()),
            content: ActiveValue::Set(serde_json::json!({})),
            is_active: ActiveValue::Set(true),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        if !params.grants.is_empty() {
            entity::prelude::AdminPermission::insert_many(params.grants.iter().map(
                |(module, action)| entity::admin_permission::ActiveModel {
                    admin_id: ActiveValue::Set(entity.id),
                    module: ActiveValue::Set(module.to_string()),
                    action: ActiveValue::Set(action.to_string()),
                    ..Default::default()
                },
            ))
            .exec(self.db)
            .await?;
        }

        self.with_grants(entity).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Admin>, AppError> {
        match entity::prelude::Admin::find_by_id(id).one(self.db).await? {
            Some(entity) => self.with_grants(entity).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        match entity::prelude::Admin::find()
            .filter(entity::admin::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?
        {
            Some(entity) => self.with_grants(entity).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn find_by_identity_uid(&self, uid: &str) -> Result<Option<Admin>, AppError> {
        match entity::prelude::Admin::find()
            .filter(entity::admin::Column::IdentityUid.eq(uid))
            .one(self.db)
            .await?
        {
            Some(entity) => self.with_grants(entity).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn set_last_login(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::Admin::update_many()
            .filter(entity::admin::Column::Id.eq(id))
            .col_expr(
                entity::admin::Column::LastLogin,
                sea_orm::sea_query::Expr::value(Some(Utc::now())),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn link_identity(&self, id: i32, uid: &str) -> Result<(), AppError> {
        entity::prelude::Admin::update_many()
            .filter(entity::admin::Column::Id.eq(id))
            .col_expr(
                entity::admin::Column::IdentityUid,
                sea_orm::sea_query::Expr::value(Some(uid.to_string())),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    async fn with_grants(&self, entity: entity::admin::Model) -> Result<Admin, AppError> {
        let permissions = entity::prelude::AdminPermission::find()
            .filter(entity::admin_permission::Column::AdminId.eq(entity.id))
            .all(self.db)
            .await?;
        Admin::from_entity(entity, permissions)
    }
}
