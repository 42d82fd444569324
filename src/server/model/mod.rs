//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! marketplace records and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod book;
pub mod client;
pub mod listing;
pub mod order;
pub mod partner;

use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::server::error::AppError;

/// Parses a string column holding an enum wire name.
///
/// A failure means the row was written outside this service, so it surfaces as a 500.
pub(crate) fn parse_stored<T>(column: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
{
    raw.parse()
        .map_err(|_| AppError::InternalError(format!("Invalid stored {} value '{}'", column, raw)))
}

/// Decodes a JSON column, treating `null` as empty.
pub(crate) fn parse_json_column<T>(column: &str, value: serde_json::Value) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::InternalError(format!("Invalid stored {} JSON: {}", column, e)))
}
