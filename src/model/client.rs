use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    enums::{ActivityKind, PlanType},
    order::OrderDto,
    partner::PartnerSummaryDto,
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanDto {
    pub plan_type: PlanType,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub related_id: Option<i32>,
}

/// Client profile. The password hash is never part of this payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: i32,
    pub client_id: String,
    pub username: String,
    pub email: String,
    pub phone_no: String,
    pub profile_pic: Option<String>,
    pub address: AddressDto,
    pub current_plan: PlanDto,
    pub activities: Vec<ActivityDto>,
    pub is_active: bool,
    pub is_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavouritePartnerDto {
    pub partner: PartnerSummaryDto,
    pub added_at: DateTime<Utc>,
}

/// Client profile with favourite partners and most recent orders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetailDto {
    #[serde(flatten)]
    pub client: ClientDto,
    pub favourite_partners: Vec<FavouritePartnerDto>,
    pub orders: Vec<OrderDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_no: String,
    #[serde(default)]
    pub address: Option<AddressDto>,
    #[serde(default)]
    pub plan_type: Option<PlanType>,
}

/// Partial client update. Absent fields keep their stored values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_no: Option<String>,
    pub profile_pic: Option<String>,
    pub address: Option<AddressDto>,
    pub plan_type: Option<PlanType>,
    /// Only honoured for admins.
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavouriteDto {
    pub partner_id: i32,
}
