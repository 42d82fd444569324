pub use super::admin::Entity as Admin;
pub use super::admin_permission::Entity as AdminPermission;
pub use super::client::Entity as Client;
pub use super::client_favourite_partner::Entity as ClientFavouritePartner;
pub use super::order::Entity as Order;
pub use super::partner::Entity as Partner;
pub use super::partner_blackout_date::Entity as PartnerBlackoutDate;
pub use super::partner_location::Entity as PartnerLocation;
pub use super::partner_package::Entity as PartnerPackage;
pub use super::partner_review::Entity as PartnerReview;
pub use super::partner_shoot_type::Entity as PartnerShootType;
pub use super::partner_specialization::Entity as PartnerSpecialization;
