//! Admin domain model and permission grants.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        admin::{AdminDto, PermissionDto},
        enums::{AdminRole, PermissionAction, PermissionModule},
    },
    server::{error::AppError, model::parse_stored},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: i32,
    pub admin_code: String,
    pub identity_uid: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub phone_no: Option<String>,
    pub role: AdminRole,
    pub grants: Vec<(PermissionModule, PermissionAction)>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    /// Converts an admin row and its permission rows into the domain model.
    ///
    /// # Returns
    /// - `Ok(Admin)` - The converted domain model
    /// - `Err(AppError::InternalError)` - A stored role, module or action is unknown
    pub fn from_entity(
        entity: entity::admin::Model,
        permissions: Vec<entity::admin_permission::Model>,
    ) -> Result<Self, AppError> {
        let grants = permissions
            .iter()
            .map(|p| {
                Ok((
                    parse_stored("module", &p.module)?,
                    parse_stored("action", &p.action)?,
                ))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            id: entity.id,
            admin_code: entity.admin_code,
            identity_uid: entity.identity_uid,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            phone_no: entity.phone_no,
            role: parse_stored("role", &entity.role)?,
            grants,
            is_active: entity.is_active,
            last_login: entity.last_login,
            created_at: entity.created_at,
        })
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }

    /// Super admins hold every grant implicitly.
    pub fn has_grant(&self, module: PermissionModule, action: PermissionAction) -> bool {
        self.is_super_admin() || self.grants.contains(&(module, action))
    }

    pub fn into_dto(self) -> AdminDto {
        let mut permissions: Vec<PermissionDto> = Vec::new();
        for (module, action) in self.grants {
            match permissions.iter_mut().find(|p| p.module == module) {
                Some(entry) => entry.actions.push(action),
                None => permissions.push(PermissionDto {
                    module,
                    actions: vec![action],
                }),
            }
        }

        AdminDto {
            id: self.id,
            admin_id: self.admin_code,
            username: self.username,
            email: self.email,
            phone_no: self.phone_no,
            role: self.role,
            permissions,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(role: AdminRole, grants: Vec<(PermissionModule, PermissionAction)>) -> Admin {
        Admin {
            id: 1,
            admin_code: "ADM_1".to_string(),
            identity_uid: None,
            username: "ops".to_string(),
            email: "ops@pixisphere.com".to_string(),
            password_hash: None,
            phone_no: None,
            role,
            grants,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn super_admin_holds_every_grant() {
        let admin = admin(AdminRole::SuperAdmin, vec![]);
        assert!(admin.has_grant(PermissionModule::System, PermissionAction::Delete));
    }

    #[test]
    fn admin_needs_explicit_grant() {
        let admin = admin(
            AdminRole::Admin,
            vec![(PermissionModule::Orders, PermissionAction::Read)],
        );
        assert!(admin.has_grant(PermissionModule::Orders, PermissionAction::Read));
        assert!(!admin.has_grant(PermissionModule::Orders, PermissionAction::Update));
    }

    #[test]
    fn groups_grants_by_module() {
        let dto = admin(
            AdminRole::Admin,
            vec![
                (PermissionModule::Orders, PermissionAction::Read),
                (PermissionModule::Users, PermissionAction::Read),
                (PermissionModule::Orders, PermissionAction::Update),
            ],
        )
        .into_dto();

        assert_eq!(dto.permissions.len(), 2);
        assert_eq!(
            dto.permissions[0].actions,
            vec![PermissionAction::Read, PermissionAction::Update]
        );
    }
}
