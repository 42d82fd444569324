//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into the JSON error envelope. The `AppError` enum serves as the
//! top-level error type that wraps domain-specific errors and implements `IntoResponse`
//! so handlers can simply return `Result<_, AppError>`.

pub mod auth;
pub mod config;
pub mod validation;

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, validation::FieldError},
};

/// Whether 500 responses include the underlying error text.
static EXPOSE_ERROR_DETAILS: AtomicBool = AtomicBool::new(false);

/// Enables or disables error details in 500 responses.
///
/// Called once at startup; only development environments turn this on.
pub fn expose_error_details(enabled: bool) {
    EXPOSE_ERROR_DETAILS.store(enabled, Ordering::Relaxed);
}

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. `AuthError` handles its own response mapping, while the remaining
/// variants map onto standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` (401 or 403).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    ///
    /// Unique constraint violations become 409 Conflict; everything else is a 500.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// One or more request fields failed validation.
    ///
    /// Results in 400 Bad Request listing every failing field.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with existing state (duplicates, illegal status transitions).
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Request body could not be parsed as the expected JSON document.
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// Password hashing or verification failure.
    #[error(transparent)]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Failure to encode a self-issued token.
    #[error(transparent)]
    TokenErr(#[from] jsonwebtoken::errors::Error),

    /// Blocking task panicked or was cancelled.
    #[error(transparent)]
    TaskErr(#[from] tokio::task::JoinError),

    /// Socket binding or serving failure.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client outside development.
    #[error("{0}")]
    InternalError(String),
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorDto::new(message))).into_response()
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `Validation`, `BadRequest` and `JsonRejection`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict` and unique constraint violations
/// - 500 Internal Server Error - For all other error types
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::Validation(errors) => {
                let body = ErrorDto {
                    errors: Some(errors.into_iter().map(FieldError::into_dto).collect()),
                    ..ErrorDto::new("Validation failed")
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => error_response(StatusCode::CONFLICT, msg),
            Self::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            Self::JsonRejection(rejection) => {
                error_response(StatusCode::BAD_REQUEST, rejection.body_text())
            }
            Self::DbErr(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    tracing::debug!("Unique constraint violation: {}", detail);
                    error_response(StatusCode::CONFLICT, "Resource already exists")
                }
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                    tracing::debug!("Foreign key constraint violation: {}", detail);
                    error_response(StatusCode::CONFLICT, "Resource is still referenced")
                }
                _ => InternalServerError(err).into_response(),
            },
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client. The error text is
/// attached in `error` only when details are exposed for development.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        let error = EXPOSE_ERROR_DETAILS
            .load(Ordering::Relaxed)
            .then(|| self.0.to_string());

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error,
                ..ErrorDto::new("Internal server error")
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation(vec![FieldError::new("page", "must be >= 1")])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InternalError("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
