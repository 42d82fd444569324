//! Client domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        client::{
            ActivityDto, AddressDto, ClientDetailDto, ClientDto, CreateClientDto,
            FavouritePartnerDto, PlanDto, UpdateClientDto,
        },
        enums::{ActivityKind, PlanType},
    },
    server::{
        error::AppError,
        model::{order::Order, parse_json_column, parse_stored, partner::Partner},
        util::validate::Validator,
    },
};

/// Address stored as flat columns on both clients and partners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

impl Address {
    pub fn from_dto(dto: AddressDto) -> Self {
        Self {
            street: dto.street,
            city: dto.city,
            state: dto.state,
            country: dto.country,
            zip_code: dto.zip_code,
        }
    }

    pub fn into_dto(self) -> AddressDto {
        AddressDto {
            street: self.street,
            city: self.city,
            state: self.state,
            country: self.country,
            zip_code: self.zip_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i32,
    pub client_code: String,
    pub identity_uid: Option<String>,
    pub username: String,
    pub email: String,
    /// Never leaves the service layer.
    pub password_hash: Option<String>,
    pub phone_no: String,
    pub profile_pic: Option<String>,
    pub address: Address,
    pub plan_type: PlanType,
    pub plan_start: Option<DateTime<Utc>>,
    pub plan_end: Option<DateTime<Utc>>,
    pub activities: Vec<ActivityDto>,
    pub is_active: bool,
    pub is_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Converts an entity model to a client domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Client)` - The converted domain model
    /// - `Err(AppError::InternalError)` - Stored plan type or activity log is malformed
    pub fn from_entity(entity: entity::client::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            client_code: entity.client_code,
            identity_uid: entity.identity_uid,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            phone_no: entity.phone_no,
            profile_pic: entity.profile_pic_url,
            address: Address {
                street: entity.street,
                city: entity.city,
                state: entity.state,
                country: entity.country,
                zip_code: entity.zip_code,
            },
            plan_type: parse_stored("plan_type", &entity.plan_type)?,
            plan_start: entity.plan_start,
            plan_end: entity.plan_end,
            activities: parse_json_column("activities", entity.activities)?,
            is_active: entity.is_active,
            is_verified: entity.is_verified,
            last_login: entity.last_login,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> ClientDto {
        ClientDto {
            id: self.id,
            client_id: self.client_code,
            username: self.username,
            email: self.email,
            phone_no: self.phone_no,
            profile_pic: self.profile_pic,
            address: self.address.into_dto(),
            current_plan: PlanDto {
                plan_type: self.plan_type,
                start_date: self.plan_start,
                end_date: self.plan_end,
            },
            activities: self.activities,
            is_active: self.is_active,
            is_verified: self.is_verified,
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Client with favourite partners and most recent orders.
#[derive(Debug, Clone)]
pub struct ClientDetail {
    pub client: Client,
    pub favourites: Vec<(Partner, DateTime<Utc>)>,
    pub orders: Vec<Order>,
}

impl ClientDetail {
    pub fn into_dto(self) -> ClientDetailDto {
        ClientDetailDto {
            client: self.client.into_dto(),
            favourite_partners: self
                .favourites
                .into_iter()
                .map(|(partner, added_at)| FavouritePartnerDto {
                    partner: partner.into_summary(),
                    added_at,
                })
                .collect(),
            orders: self.orders.into_iter().map(Order::into_dto).collect(),
        }
    }
}

/// Builds an activity log entry stamped with the current time.
pub fn activity(kind: ActivityKind, description: impl Into<String>, related_id: Option<i32>) -> ActivityDto {
    ActivityDto {
        kind,
        description: description.into(),
        timestamp: Utc::now(),
        related_id,
    }
}

/// Validates account fields shared by client and partner sign-up.
pub fn validate_account_fields(v: &mut Validator, username: &str, email: &str, phone_no: &str) {
    v.length("username", username, 3, 30);
    v.email("email", email);
    v.phone("phoneNo", phone_no);
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateClientParams {
    pub username: String,
    /// Stored lowercase.
    pub email: String,
    /// Plain text; hashed by the service before storage.
    pub password: Option<String>,
    pub phone_no: String,
    pub address: Address,
    pub plan_type: PlanType,
    pub identity_uid: Option<String>,
}

impl CreateClientParams {
    /// Validates a sign-up request.
    ///
    /// # Returns
    /// - `Ok(CreateClientParams)` - Every field is valid
    /// - `Err(AppError::Validation)` - One entry per failing field
    pub fn from_dto(dto: CreateClientDto) -> Result<Self, AppError> {
        let mut v = Validator::new();
        validate_account_fields(&mut v, &dto.username, &dto.email, &dto.phone_no);
        v.length("password", &dto.password, 6, 128);
        v.finish()?;

        Ok(Self {
            username: dto.username.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            password: Some(dto.password),
            phone_no: dto.phone_no.trim().to_string(),
            address: dto.address.map(Address::from_dto).unwrap_or_default(),
            plan_type: dto.plan_type.unwrap_or_default(),
            identity_uid: None,
        })
    }
}

/// Partial client update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateClientParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_no: Option<String>,
    pub profile_pic: Option<String>,
    pub address: Option<Address>,
    pub plan_type: Option<PlanType>,
    pub is_active: Option<bool>,
}

impl UpdateClientParams {
    /// Validates an update request. `is_active` is dropped unless `allow_admin_fields`.
    pub fn from_dto(dto: UpdateClientDto, allow_admin_fields: bool) -> Result<Self, AppError> {
        let mut v = Validator::new();
        if let Some(username) = &dto.username {
            v.length("username", username, 3, 30);
        }
        if let Some(email) = &dto.email {
            v.email("email", email);
        }
        if let Some(phone_no) = &dto.phone_no {
            v.phone("phoneNo", phone_no);
        }
        v.finish()?;

        Ok(Self {
            username: dto.username.map(|u| u.trim().to_string()),
            email: dto.email.map(|e| e.trim().to_lowercase()),
            phone_no: dto.phone_no,
            profile_pic: dto.profile_pic,
            address: dto.address.map(Address::from_dto),
            plan_type: dto.plan_type,
            is_active: dto.is_active.filter(|_| allow_admin_fields),
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
