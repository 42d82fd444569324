//! Request and response DTOs shared by every endpoint.
//!
//! Everything here serializes as camelCase JSON and derives `ToSchema` for the OpenAPI
//! document. Server-side domain models live in `server::model` and convert into these
//! types at the controller boundary.

pub mod admin;
pub mod api;
pub mod auth;
pub mod book;
pub mod client;
pub mod enums;
pub mod order;
pub mod partner;
