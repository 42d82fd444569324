//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and a `create_*` convenience function
//! for quick default creation. Factories insert directly through SeaORM active models so tests
//! do not depend on the service layer.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let client = factory::create_client(&db).await?;
//! let partner = factory::partner::PartnerFactory::new(&db)
//!     .verified(true)
//!     .price_per_day(15000.0)
//!     .shoot_types(["wedding", "portrait"])
//!     .city("Mumbai")
//!     .build()
//!     .await?;
//! let order = factory::create_order(&db, client.id, partner.id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `client` - Client accounts
//! - `partner` - Partner accounts with shoot types, locations and blackout dates
//! - `order` - Orders between a client and a partner
//! - `admin` - Admin accounts with permission grants
//! - `helpers` - Unique id counter and multi-entity helpers

pub mod admin;
pub mod client;
pub mod helpers;
pub mod order;
pub mod partner;

pub use admin::create_admin;
pub use client::create_client;
pub use order::create_order;
pub use partner::create_partner;
