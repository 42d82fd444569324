use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token in the `Authorization` header.
    #[error("Authorization token missing")]
    MissingToken,

    /// Token failed verification as both a self-issued and an external identity token.
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    /// Token verified but no local account matches it.
    #[error("No account found for token subject {0}")]
    AccountNotFound(String),

    /// Matching account has been deactivated.
    #[error("Account {0} is deactivated")]
    AccountInactive(String),

    /// External identity token presented but no identity provider is configured.
    #[error("External identity provider is not configured")]
    IdentityProviderDisabled,

    /// Email/password login failed. The message never says which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated account lacks a required permission.
    #[error("Access denied: {0}")]
    AccessDenied(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Details are logged at debug level; clients only see a generic message.
///
/// # Returns
/// - 401 Unauthorized - For every token, account and credential failure
/// - 403 Forbidden - For `AccessDenied`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Access token required"),
            Self::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            Self::AccountNotFound(_) => (StatusCode::UNAUTHORIZED, "User not found"),
            Self::AccountInactive(_) => (StatusCode::UNAUTHORIZED, "Account is deactivated"),
            Self::IdentityProviderDisabled => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::AccessDenied(_) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
