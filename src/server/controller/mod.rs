//! HTTP request handlers.
//!
//! Each handler checks access through `AuthGuard`, turns the request DTO or query string
//! into validated parameters, calls a service and wraps the result in `ApiResponse`.

pub mod admin;
pub mod auth;
pub mod book;
pub mod client;
pub mod health;
pub mod order;
pub mod partner;

use serde::Serialize;

use crate::server::error::AppError;

/// Encodes accepted filters or summaries for the response envelope.
pub(crate) fn echo<T: Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Failed to encode response field: {}", e)))
}

#[cfg(test)]
mod test;
