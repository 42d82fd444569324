use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    admin::AdminDto,
    client::{AddressDto, ClientDto},
    enums::{PartnerType, ShootType, UserType},
    partner::PartnerDto,
};

/// Registration of a local account for an identity already verified by the external
/// provider. The identity uid is taken from the bearer token, never from the body.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDto {
    pub user_type: UserType,
    pub username: String,
    pub email: String,
    pub phone_no: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub address: Option<AddressDto>,
    /// Required for partners.
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub partner_type: Option<PartnerType>,
    #[serde(default)]
    pub shoot_types: Vec<ShootType>,
    #[serde(default)]
    pub price_per_day: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountDto {
    pub email: String,
    #[serde(default)]
    pub user_type: Option<UserType>,
}

/// Profile of the authenticated account, tagged with its user type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(tag = "userType")]
pub enum ProfileDto {
    Client(ClientDto),
    Partner(PartnerDto),
    Admin(AdminDto),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenDto {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: ProfileDto,
}
