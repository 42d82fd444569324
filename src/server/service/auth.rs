//! Authentication service.
//!
//! Bridges self-issued session tokens and external identity tokens to local accounts,
//! and handles registration, password login and account linking.

use sea_orm::DatabaseConnection;

use crate::{
    model::enums::UserType,
    server::{
        data::{admin::AdminRepository, client::ClientRepository, partner::PartnerRepository},
        error::{auth::AuthError, AppError},
        model::auth::{AuthenticatedUser, RegisterParams},
        service::token::{SessionClaims, TokenKeys},
    },
};

#[cfg(not(test))]
const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const BCRYPT_COST: u32 = 4;

/// Hashes a password on the blocking pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST)).await??)
}

async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hash = hash.to_string();
    Ok(tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}

/// Service resolving and managing authenticated accounts.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the account named by a session token.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - Account matching the subject and user type
    /// - `Err(AuthError::AccountNotFound)` - No such account
    /// - `Err(AppError::DbErr)` - Database error during lookup
    pub async fn resolve_session(&self, claims: &SessionClaims) -> Result<AuthenticatedUser, AppError> {
        let id = claims.account_id()?;
        self.find_by_id(id, claims.user_type)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound(claims.sub.clone()).into())
    }

    /// Finds the account linked to an external identity, probing clients, then partners,
    /// then admins.
    pub async fn resolve_identity(&self, uid: &str) -> Result<Option<AuthenticatedUser>, AppError> {
        if let Some(client) = ClientRepository::new(self.db).find_by_identity_uid(uid).await? {
            return Ok(Some(AuthenticatedUser::Client(client)));
        }
        if let Some(partner) = PartnerRepository::new(self.db).find_by_identity_uid(uid).await? {
            return Ok(Some(AuthenticatedUser::Partner(partner)));
        }
        if let Some(admin) = AdminRepository::new(self.db).find_by_identity_uid(uid).await? {
            return Ok(Some(AuthenticatedUser::Admin(admin)));
        }
        Ok(None)
    }

    /// Creates a client or partner account for an external identity.
    ///
    /// Nothing is written when the identity is already linked anywhere or the email or
    /// username is already used in the target collection.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - The created account
    /// - `Err(AppError::Conflict)` - Duplicate email, username or identity
    pub async fn register(&self, params: RegisterParams) -> Result<AuthenticatedUser, AppError> {
        let uid = match &params {
            RegisterParams::Client(c) => c.identity_uid.clone(),
            RegisterParams::Partner(p) => p.identity_uid.clone(),
        };
        let identity_taken = match &uid {
            Some(uid) => self.resolve_identity(uid).await?.is_some(),
            None => false,
        };

        let taken = identity_taken
            || match &params {
                RegisterParams::Client(_) => {
                    ClientRepository::new(self.db)
                        .is_taken(Some(params.email()), Some(params.username()), None)
                        .await?
                }
                RegisterParams::Partner(_) => {
                    PartnerRepository::new(self.db)
                        .is_taken(Some(params.email()), Some(params.username()), None)
                        .await?
                }
            };
        if taken {
            return Err(AppError::Conflict(
                "User with this email, username, or identity already exists".to_string(),
            ));
        }

        let password_hash = match params.password() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let user = match params {
            RegisterParams::Client(params) => AuthenticatedUser::Client(
                ClientRepository::new(self.db)
                    .create(&params, password_hash)
                    .await?,
            ),
            RegisterParams::Partner(params) => AuthenticatedUser::Partner(
                PartnerRepository::new(self.db)
                    .create(&params, password_hash)
                    .await?,
            ),
        };

        tracing::info!(
            "Registered {} account {} for identity {:?}",
            user.user_type(),
            user.id(),
            uid
        );

        Ok(user)
    }

    /// Checks email and password against the collection named by `user_type` and issues a
    /// session token.
    ///
    /// # Returns
    /// - `Ok((token, user))` - Signed token and the logged in account
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email, no password set, or wrong password
    /// - `Err(AuthError::AccountInactive)` - Credentials matched a deactivated account
    pub async fn login(
        &self,
        tokens: &TokenKeys,
        email: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<(String, AuthenticatedUser), AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.find_by_email(&email, user_type).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let Some(hash) = user.password_hash() else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(password, hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active() {
            return Err(AuthError::AccountInactive(user.id().to_string()).into());
        }

        self.touch_last_login(&user).await?;
        let token = tokens.issue(user.id(), user.user_type())?;

        Ok((token, user))
    }

    /// Stores an external identity uid on an active account found by email.
    ///
    /// Without `user_type`, clients, partners and admins are searched in that order.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - The linked account
    /// - `Err(AppError::NotFound)` - No active account with that email
    pub async fn link_account(
        &self,
        email: &str,
        user_type: Option<UserType>,
        uid: &str,
    ) -> Result<AuthenticatedUser, AppError> {
        let email = email.trim().to_lowercase();
        let types: &[UserType] = match &user_type {
            Some(user_type) => std::slice::from_ref(user_type),
            None => &[UserType::Client, UserType::Partner, UserType::Admin],
        };

        let mut found = None;
        for user_type in types {
            if let Some(user) = self.find_by_email(&email, *user_type).await? {
                if user.is_active() {
                    found = Some(user);
                    break;
                }
            }
        }
        let Some(user) = found else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        match &user {
            AuthenticatedUser::Client(c) => ClientRepository::new(self.db).link_identity(c.id, uid).await?,
            AuthenticatedUser::Partner(p) => PartnerRepository::new(self.db).link_identity(p.id, uid).await?,
            AuthenticatedUser::Admin(a) => AdminRepository::new(self.db).link_identity(a.id, uid).await?,
        }
        self.touch_last_login(&user).await?;

        tracing::info!("Linked identity {} to {} account {}", uid, user.user_type(), user.id());

        // Reload so the response carries the stored uid and login time.
        self.find_by_id(user.id(), user.user_type())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn find_by_id(
        &self,
        id: i32,
        user_type: UserType,
    ) -> Result<Option<AuthenticatedUser>, AppError> {
        Ok(match user_type {
            UserType::Client => ClientRepository::new(self.db)
                .find_by_id(id)
                .await?
                .map(AuthenticatedUser::Client),
            UserType::Partner => PartnerRepository::new(self.db)
                .find_by_id(id)
                .await?
                .map(AuthenticatedUser::Partner),
            UserType::Admin | UserType::SuperAdmin => AdminRepository::new(self.db)
                .find_by_id(id)
                .await?
                .map(AuthenticatedUser::Admin),
        })
    }

    async fn find_by_email(
        &self,
        email: &str,
        user_type: UserType,
    ) -> Result<Option<AuthenticatedUser>, AppError> {
        Ok(match user_type {
            UserType::Client => ClientRepository::new(self.db)
                .find_by_email(email)
                .await?
                .map(AuthenticatedUser::Client),
            UserType::Partner => PartnerRepository::new(self.db)
                .find_by_email(email)
                .await?
                .map(AuthenticatedUser::Partner),
            UserType::Admin | UserType::SuperAdmin => AdminRepository::new(self.db)
                .find_by_email(email)
                .await?
                .map(AuthenticatedUser::Admin),
        })
    }

    async fn touch_last_login(&self, user: &AuthenticatedUser) -> Result<(), AppError> {
        match user {
            AuthenticatedUser::Client(c) => ClientRepository::new(self.db).set_last_login(c.id).await,
            AuthenticatedUser::Partner(p) => PartnerRepository::new(self.db).set_last_login(p.id).await,
            AuthenticatedUser::Admin(a) => AdminRepository::new(self.db).set_last_login(a.id).await,
        }
    }
}
