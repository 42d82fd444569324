//! String-backed enums used in query parameters, request bodies and stored columns.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Returned by `FromStr` when a value is not one of the enum's wire names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("must be one of: {allowed}")]
pub struct UnknownVariant {
    pub allowed: String,
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Comma separated list of accepted wire names.
            pub fn allowed() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(UnknownVariant { allowed: Self::allowed() }),
                }
            }
        }
    };
}

string_enum! {
    /// Subscription tier shared by clients and partners.
    PlanType {
        Free => "free",
        Basic => "basic",
        Premium => "premium",
        Enterprise => "enterprise",
    }
}

impl PlanType {
    /// Premium and enterprise plans count as paid tiers in dashboards.
    pub fn is_premium(&self) -> bool {
        matches!(self, PlanType::Premium | PlanType::Enterprise)
    }
}

impl Default for PlanType {
    fn default() -> Self {
        PlanType::Free
    }
}

string_enum! {
    PartnerType {
        Individual => "individual",
        Company => "company",
        Agency => "agency",
    }
}

impl Default for PartnerType {
    fn default() -> Self {
        PartnerType::Individual
    }
}

string_enum! {
    /// Photography categories a partner can offer.
    ShootType {
        Wedding => "wedding",
        Portrait => "portrait",
        Event => "event",
        Commercial => "commercial",
        Fashion => "fashion",
        Product => "product",
        RealEstate => "real_estate",
        Food => "food",
        Travel => "travel",
        Sports => "sports",
        Maternity => "maternity",
        Newborn => "newborn",
        Family => "family",
        Corporate => "corporate",
        Architecture => "architecture",
    }
}

string_enum! {
    /// Account collection an authenticated user belongs to.
    ///
    /// `SuperAdmin` only appears in token claims; both admin roles live in the admin table.
    UserType {
        Client => "Client",
        Partner => "Partner",
        Admin => "Admin",
        SuperAdmin => "SuperAdmin",
    }
}

impl UserType {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserType::Admin | UserType::SuperAdmin)
    }
}

string_enum! {
    AdminRole {
        Admin => "Admin",
        SuperAdmin => "SuperAdmin",
    }
}

string_enum! {
    PermissionModule {
        Users => "users",
        Partners => "partners",
        Orders => "orders",
        Reviews => "reviews",
        Content => "content",
        System => "system",
        Analytics => "analytics",
    }
}

string_enum! {
    PermissionAction {
        Create => "create",
        Read => "read",
        Update => "update",
        Delete => "delete",
        Approve => "approve",
        Reject => "reject",
    }
}

string_enum! {
    OrderStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
        Refunded => "refunded",
    }
}

string_enum! {
    /// Delivery milestone reported alongside the order status.
    CurrentStage {
        BookingConfirmed => "booking_confirmed",
        Preparation => "preparation",
        ShootDay => "shoot_day",
        PostProcessing => "post_processing",
        Delivery => "delivery",
        Completed => "completed",
    }
}

string_enum! {
    PaymentStatus {
        Pending => "pending",
        Partial => "partial",
        Completed => "completed",
        Refunded => "refunded",
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

string_enum! {
    DataProvidingMethod {
        CloudStorage => "cloud_storage",
        PhysicalMedia => "physical_media",
        Email => "email",
        Ftp => "ftp",
        DirectDownload => "direct_download",
    }
}

impl Default for DataProvidingMethod {
    fn default() -> Self {
        DataProvidingMethod::CloudStorage
    }
}

string_enum! {
    ActivityKind {
        OrderPlaced => "order_placed",
        OrderCompleted => "order_completed",
        ReviewGiven => "review_given",
        PartnerFavorited => "partner_favorited",
        ProfileUpdated => "profile_updated",
    }
}

string_enum! {
    TransactionKind {
        PaymentReceived => "payment_received",
        Refund => "refund",
        CommissionDeducted => "commission_deducted",
    }
}

string_enum! {
    Weekday {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
        Sunday => "sunday",
    }
}

string_enum! {
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

string_enum! {
    /// Bucket size for order analytics.
    GroupBy {
        Day => "day",
        Week => "week",
        Month => "month",
        Year => "year",
    }
}

impl Default for GroupBy {
    fn default() -> Self {
        GroupBy::Month
    }
}

string_enum! {
    AnalyticsPeriod {
        SevenDays => "7d",
        ThirtyDays => "30d",
        NinetyDays => "90d",
        OneYear => "1y",
    }
}

impl AnalyticsPeriod {
    pub fn days(&self) -> i64 {
        match self {
            AnalyticsPeriod::SevenDays => 7,
            AnalyticsPeriod::ThirtyDays => 30,
            AnalyticsPeriod::NinetyDays => 90,
            AnalyticsPeriod::OneYear => 365,
        }
    }
}

impl Default for AnalyticsPeriod {
    fn default() -> Self {
        AnalyticsPeriod::ThirtyDays
    }
}

string_enum! {
    AnalyticsMetric {
        Revenue => "revenue",
        Orders => "orders",
        Users => "users",
        Engagement => "engagement",
    }
}

impl Default for AnalyticsMetric {
    fn default() -> Self {
        AnalyticsMetric::Revenue
    }
}

string_enum! {
    PartnerSort {
        CreatedAt => "createdAt",
        Username => "username",
        CompanyName => "companyName",
        Rating => "ratings.average",
        PricePerDay => "pricePerDay",
    }
}

string_enum! {
    ClientSort {
        CreatedAt => "createdAt",
        Username => "username",
        Email => "email",
        LastLogin => "lastLogin",
    }
}

string_enum! {
    OrderSort {
        CreatedAt => "createdAt",
        EventDateTime => "eventDateTime",
        BookingDateTime => "bookingDateTime",
        TotalAmount => "pricing.totalAmount",
        Progress => "progress.percentage",
    }
}

string_enum! {
    BookSort {
        Title => "title",
        Author => "author",
        PublishedYear => "publishedYear",
    }
}
