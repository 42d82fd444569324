//! SeaORM entities for the marketplace schema.
//!
//! One module per table. The schema itself is owned by the `migration` crate; these
//! definitions must stay in sync with it.

pub mod prelude;

pub mod admin;
pub mod admin_permission;
pub mod client;
pub mod client_favourite_partner;
pub mod order;
pub mod partner;
pub mod partner_blackout_date;
pub mod partner_location;
pub mod partner_package;
pub mod partner_review;
pub mod partner_shoot_type;
pub mod partner_specialization;
