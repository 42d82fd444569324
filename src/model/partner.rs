use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    client::AddressDto,
    enums::{PartnerType, PlanType, ShootType, TransactionKind, Weekday},
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct RatingBreakdownDto {
    pub five: i32,
    pub four: i32,
    pub three: i32,
    pub two: i32,
    pub one: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingsDto {
    pub average: f64,
    pub total_reviews: i32,
    pub breakdown: RatingBreakdownDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub city: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub service_radius: Option<i32>,
    pub travel_charges: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageDto {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration: Option<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BlackoutDateDto {
    pub date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayScheduleDto {
    pub day: Weekday,
    pub is_available: bool,
    /// Local time of day as `HH:MM`.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDto {
    pub schedule: Vec<DayScheduleDto>,
    pub blackout_dates: Vec<BlackoutDateDto>,
    pub timezone: Option<String>,
}

/// Availability for a single calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DateAvailabilityDto {
    pub date: NaiveDate,
    pub available: bool,
    pub schedule: Option<DayScheduleDto>,
}

/// Response of the availability endpoint: a single day when `date` is given, otherwise the
/// weekly schedule with blackout dates (optionally narrowed to one month).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(untagged)]
pub enum AvailabilityResponseDto {
    Date(DateAvailabilityDto),
    Calendar(AvailabilityDto),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub order_id: Option<i32>,
    pub date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsDto {
    pub total_revenue: f64,
    pub transactions: Vec<TransactionDto>,
}

/// Full partner profile. Earnings are only present for the partner themselves and admins.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDto {
    pub id: i32,
    pub partner_id: String,
    pub username: String,
    pub company_name: String,
    pub email: String,
    pub phone_no: String,
    pub profile_pic: Option<String>,
    pub banner_image: Option<String>,
    pub address: AddressDto,
    pub years_of_experience: Option<i32>,
    pub plan_type: PlanType,
    pub partner_type: PartnerType,
    pub shoot_types: Vec<ShootType>,
    pub specializations: Vec<String>,
    pub locations: Vec<LocationDto>,
    pub packages: Vec<PackageDto>,
    pub price_per_day: Option<f64>,
    pub ratings: RatingsDto,
    pub verified: bool,
    pub availability: AvailabilityDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<EarningsDto>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact partner reference embedded in favourites and dashboards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSummaryDto {
    pub id: i32,
    pub partner_id: String,
    pub username: String,
    pub company_name: String,
    pub profile_pic: Option<String>,
    pub price_per_day: Option<f64>,
    pub ratings: RatingsDto,
    pub verified: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerDto {
    pub username: String,
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub phone_no: String,
    #[serde(default)]
    pub address: Option<AddressDto>,
    #[serde(default)]
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub partner_type: Option<PartnerType>,
    #[serde(default)]
    pub plan_type: Option<PlanType>,
    pub shoot_types: Vec<ShootType>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<LocationDto>,
    #[serde(default)]
    pub packages: Vec<PackageDto>,
    #[serde(default)]
    pub price_per_day: Option<f64>,
}

/// Partial partner update. Collections, when present, replace the stored set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerDto {
    pub username: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone_no: Option<String>,
    pub profile_pic: Option<String>,
    pub banner_image: Option<String>,
    pub address: Option<AddressDto>,
    pub years_of_experience: Option<i32>,
    pub partner_type: Option<PartnerType>,
    pub plan_type: Option<PlanType>,
    pub shoot_types: Option<Vec<ShootType>>,
    pub specializations: Option<Vec<String>>,
    pub locations: Option<Vec<LocationDto>>,
    pub packages: Option<Vec<PackageDto>>,
    pub price_per_day: Option<f64>,
    pub schedule: Option<Vec<DayScheduleDto>>,
    pub blackout_dates: Option<Vec<BlackoutDateDto>>,
    pub timezone: Option<String>,
    /// Only honoured for admins.
    pub verified: Option<bool>,
    /// Only honoured for admins.
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub order_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub partner_id: i32,
    pub client_id: i32,
    pub order_id: Option<i32>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review together with the partner's recomputed rating aggregate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResultDto {
    pub review: ReviewDto,
    pub ratings: RatingsDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteriaDto {
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "shootType")]
    pub shoot_types: Vec<ShootType>,
    pub budget: Option<f64>,
    pub radius: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSearchDto {
    pub partners: Vec<PartnerDto>,
    pub count: usize,
    pub search_criteria: SearchCriteriaDto,
}
