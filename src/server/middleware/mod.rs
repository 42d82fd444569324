//! Request guards.
//!
//! Authentication is not a tower layer: handlers build an [`auth::AuthGuard`] from the
//! shared state and request headers and call `require` with the permissions they need.

pub mod auth;

#[cfg(test)]
mod test;
