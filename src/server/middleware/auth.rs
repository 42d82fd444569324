use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::{
    model::enums::{PermissionAction, PermissionModule, UserType},
    server::{
        error::{auth::AuthError, AppError},
        model::auth::AuthenticatedUser,
        service::{auth::AuthService, token::IdentityClaims},
        state::AppState,
    },
};

pub enum Permission {
    /// Any admin, whatever the role.
    Admin,
    /// Super admins, or admins holding the grant.
    AdminGrant(PermissionModule, PermissionAction),
    /// The account itself, or any admin.
    SelfOrAdmin(UserType, i32),
    /// Accounts of the given type.
    Role(UserType),
    /// The order's client or partner, or any admin.
    OrderParticipant { client_id: i32, partner_id: i32 },
}

impl Permission {
    fn allows(&self, user: &AuthenticatedUser) -> bool {
        match self {
            Permission::Admin => user.is_admin(),
            Permission::AdminGrant(module, action) => user
                .as_admin()
                .is_some_and(|admin| admin.has_grant(*module, *action)),
            Permission::SelfOrAdmin(user_type, id) => {
                user.is_admin() || user.is_account(*user_type, *id)
            }
            Permission::Role(user_type) => match user_type {
                UserType::Admin | UserType::SuperAdmin => user.is_admin(),
                _ => user.is_account(*user_type, user.id()),
            },
            Permission::OrderParticipant {
                client_id,
                partner_id,
            } => {
                user.is_admin()
                    || user.is_account(UserType::Client, *client_id)
                    || user.is_account(UserType::Partner, *partner_id)
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Permission::Admin => "admin".to_string(),
            Permission::AdminGrant(module, action) => format!("{}:{}", module, action),
            Permission::SelfOrAdmin(user_type, id) => format!("{} {} or admin", user_type, id),
            Permission::Role(user_type) => user_type.to_string(),
            Permission::OrderParticipant {
                client_id,
                partner_id,
            } => format!("participant of order (client {}, partner {})", client_id, partner_id),
        }
    }
}

/// Bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub struct AuthGuard<'a> {
    state: &'a AppState,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(state: &'a AppState, headers: &'a HeaderMap) -> Self {
        Self { state, headers }
    }

    /// Authenticates the request and checks every permission.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - Active account satisfying all permissions
    /// - `Err(AuthError)` - 401 for token or account failures, 403 for a missing permission
    pub async fn require(&self, permissions: &[Permission]) -> Result<AuthenticatedUser, AppError> {
        let user = self.authenticate().await?;
        Self::authorize(&user, permissions)?;

        Ok(user)
    }

    /// Checks permissions for an already authenticated user, for handlers that must load a
    /// record before they know which permission applies.
    pub fn authorize(user: &AuthenticatedUser, permissions: &[Permission]) -> Result<(), AppError> {
        for permission in permissions {
            if !permission.allows(user) {
                return Err(AuthError::AccessDenied(format!(
                    "{} {} lacks {}",
                    user.user_type(),
                    user.id(),
                    permission.describe()
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Account behind the request, or `None` when no bearer token was sent.
    ///
    /// A token that is present but fails verification is still rejected.
    pub async fn current(&self) -> Result<Option<AuthenticatedUser>, AppError> {
        if bearer_token(self.headers).is_none() {
            return Ok(None);
        }
        self.authenticate().await.map(Some)
    }

    /// Verifies the bearer token as an external identity token without requiring a local
    /// account. Used by registration and account linking.
    pub fn identity(&self) -> Result<IdentityClaims, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;
        let verifier = self
            .state
            .identity
            .as_ref()
            .ok_or(AuthError::IdentityProviderDisabled)?;
        Ok(verifier.verify(token)?)
    }

    /// Resolves the token to an active account, trying a session token first and then an
    /// external identity token.
    async fn authenticate(&self) -> Result<AuthenticatedUser, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;
        let auth_service = AuthService::new(&self.state.db);

        let user = match self.state.tokens.verify(token) {
            Ok(claims) => auth_service.resolve_session(&claims).await?,
            Err(session_err) => {
                let Some(verifier) = &self.state.identity else {
                    return Err(session_err.into());
                };
                let claims = verifier.verify(token)?;
                auth_service
                    .resolve_identity(&claims.sub)
                    .await?
                    .ok_or(AuthError::AccountNotFound(claims.sub))?
            }
        };

        if !user.is_active() {
            return Err(AuthError::AccountInactive(user.id().to_string()).into());
        }

        Ok(user)
    }
}
