//! The account behind an authenticated request.

use crate::{
    model::{
        auth::{ProfileDto, RegisterDto},
        enums::UserType,
    },
    server::{
        error::AppError,
        model::{
            admin::Admin,
            client::{validate_account_fields, Address, Client, CreateClientParams},
            partner::{CreatePartnerParams, Partner},
        },
        util::validate::Validator,
    },
};

/// Account resolved from a session or identity token.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthenticatedUser {
    Client(Client),
    Partner(Partner),
    Admin(Admin),
}

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        match self {
            AuthenticatedUser::Client(c) => c.id,
            AuthenticatedUser::Partner(p) => p.id,
            AuthenticatedUser::Admin(a) => a.id,
        }
    }

    /// User type written into session tokens. Super admins keep their own type.
    pub fn user_type(&self) -> UserType {
        match self {
            AuthenticatedUser::Client(_) => UserType::Client,
            AuthenticatedUser::Partner(_) => UserType::Partner,
            AuthenticatedUser::Admin(a) if a.is_super_admin() => UserType::SuperAdmin,
            AuthenticatedUser::Admin(_) => UserType::Admin,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            AuthenticatedUser::Client(c) => c.is_active,
            AuthenticatedUser::Partner(p) => p.is_active,
            AuthenticatedUser::Admin(a) => a.is_active,
        }
    }

    pub fn password_hash(&self) -> Option<&str> {
        match self {
            AuthenticatedUser::Client(c) => c.password_hash.as_deref(),
            AuthenticatedUser::Partner(p) => p.password_hash.as_deref(),
            AuthenticatedUser::Admin(a) => a.password_hash.as_deref(),
        }
    }

    pub fn as_admin(&self) -> Option<&Admin> {
        match self {
            AuthenticatedUser::Admin(admin) => Some(admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.as_admin().is_some()
    }

    /// `true` when this is the account of the given type and id.
    pub fn is_account(&self, user_type: UserType, id: i32) -> bool {
        let same_type = match self {
            AuthenticatedUser::Client(_) => user_type == UserType::Client,
            AuthenticatedUser::Partner(_) => user_type == UserType::Partner,
            AuthenticatedUser::Admin(_) => user_type.is_admin(),
        };
        same_type && self.id() == id
    }

    /// Partners see their own earnings on their profile.
    pub fn into_profile(self) -> ProfileDto {
        match self {
            AuthenticatedUser::Client(client) => ProfileDto::Client(client.into_dto()),
            AuthenticatedUser::Partner(partner) => ProfileDto::Partner(partner.into_dto(true)),
            AuthenticatedUser::Admin(admin) => ProfileDto::Admin(admin.into_dto()),
        }
    }
}

/// Account to create for an identity verified by the external provider.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterParams {
    Client(CreateClientParams),
    Partner(CreatePartnerParams),
}

impl RegisterParams {
    /// Validates a registration request and binds it to the external identity `uid`.
    ///
    /// # Returns
    /// - `Ok(RegisterParams)` - Client or partner sign-up parameters
    /// - `Err(AppError::Validation)` - Unsupported user type or invalid fields
    pub fn from_dto(dto: RegisterDto, uid: &str) -> Result<Self, AppError> {
        let mut v = Validator::new();
        if !matches!(dto.user_type, UserType::Client | UserType::Partner) {
            v.push("userType", "must be one of: Client, Partner");
        }
        validate_account_fields(&mut v, &dto.username, &dto.email, &dto.phone_no);
        if let Some(password) = &dto.password {
            v.length("password", password, 6, 128);
        }
        if dto.user_type == UserType::Partner {
            if dto.company_name.as_deref().is_none_or(|c| c.trim().is_empty()) {
                v.push("companyName", "is required for partners");
            }
            if dto.shoot_types.is_empty() {
                v.push("shootTypes", "at least one shoot type is required");
            }
            v.range("pricePerDay", dto.price_per_day, 0.0, f64::MAX);
        }
        v.finish()?;

        let username = dto.username.trim().to_string();
        let email = dto.email.trim().to_lowercase();
        let phone_no = dto.phone_no.trim().to_string();
        let address = dto.address.map(Address::from_dto).unwrap_or_default();
        let identity_uid = Some(uid.to_string());

        Ok(match dto.user_type {
            UserType::Partner => RegisterParams::Partner(CreatePartnerParams {
                username,
                company_name: dto.company_name.unwrap_or_default().trim().to_string(),
                email,
                password: dto.password,
                phone_no,
                address,
                years_of_experience: None,
                partner_type: dto.partner_type.unwrap_or_default(),
                plan_type: Default::default(),
                shoot_types: dto.shoot_types,
                specializations: Vec::new(),
                locations: Vec::new(),
                packages: Vec::new(),
                price_per_day: dto.price_per_day,
                identity_uid,
            }),
            _ => RegisterParams::Client(CreateClientParams {
                username,
                email,
                password: dto.password,
                phone_no,
                address,
                plan_type: Default::default(),
                identity_uid,
            }),
        })
    }

    pub fn email(&self) -> &str {
        match self {
            RegisterParams::Client(c) => &c.email,
            RegisterParams::Partner(p) => &p.email,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            RegisterParams::Client(c) => &c.username,
            RegisterParams::Partner(p) => &p.username,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            RegisterParams::Client(c) => c.password.as_deref(),
            RegisterParams::Partner(p) => p.password.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::enums::ShootType;

    fn register_dto(user_type: UserType) -> RegisterDto {
        RegisterDto {
            user_type,
            username: "lens_master".to_string(),
            email: "Lens@Example.com".to_string(),
            phone_no: "+1234567890".to_string(),
            password: None,
            address: None,
            company_name: Some("Lens Master Studio".to_string()),
            partner_type: None,
            shoot_types: vec![ShootType::Wedding],
            price_per_day: Some(1500.0),
        }
    }

    #[test]
    fn binds_registration_to_identity_uid() {
        let params = RegisterParams::from_dto(register_dto(UserType::Partner), "uid-7").unwrap();
        let RegisterParams::Partner(partner) = params else {
            panic!("expected partner registration");
        };
        assert_eq!(partner.identity_uid.as_deref(), Some("uid-7"));
        assert_eq!(partner.email, "lens@example.com");
        assert_eq!(partner.password, None);
    }

    #[test]
    fn partner_registration_requires_company_and_shoot_types() {
        let dto = RegisterDto {
            company_name: None,
            shoot_types: vec![],
            ..register_dto(UserType::Partner)
        };
        let Err(AppError::Validation(errors)) = RegisterParams::from_dto(dto, "uid") else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["companyName", "shootTypes"]);
    }

    #[test]
    fn admins_cannot_self_register() {
        assert!(matches!(
            RegisterParams::from_dto(register_dto(UserType::Admin), "uid"),
            Err(AppError::Validation(_))
        ));
    }
}
