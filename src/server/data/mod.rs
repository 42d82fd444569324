//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Filter documents are
//! translated into SeaORM conditions by [`condition`].

pub mod admin;
pub mod client;
pub mod condition;
pub mod order;
pub mod partner;
pub mod review;

#[cfg(test)]
mod test;
