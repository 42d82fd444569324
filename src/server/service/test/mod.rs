use chrono::{Duration, Utc};
use sea_orm::EntityTrait;

use crate::{
    model::enums::{OrderStatus, PlanType, ShootType, UserType},
    server::{
        error::{auth::AuthError, AppError},
        model::{
            auth::{AuthenticatedUser, RegisterParams},
            client::{Address, CreateClientParams},
            partner::CreatePartnerParams,
        },
    },
};
use test_utils::{builder::TestBuilder, factory};

mod order;
mod seed;

fn client_params(username: &str, email: &str) -> CreateClientParams {
    CreateClientParams {
        username: username.to_string(),
        email: email.to_string(),
        password: Some("password123".to_string()),
        phone_no: "+1234567890".to_string(),
        address: Address::default(),
        plan_type: PlanType::Free,
        identity_uid: None,
    }
}

fn partner_params(username: &str, email: &str) -> CreatePartnerParams {
    CreatePartnerParams {
        username: username.to_string(),
        company_name: "Test Studio".to_string(),
        email: email.to_string(),
        password: Some("password123".to_string()),
        phone_no: "+1234567890".to_string(),
        address: Address::default(),
        years_of_experience: Some(3),
        partner_type: Default::default(),
        plan_type: PlanType::Free,
        shoot_types: vec![ShootType::Wedding],
        specializations: Vec::new(),
        locations: Vec::new(),
        packages: Vec::new(),
        price_per_day: Some(1000.0),
        identity_uid: None,
    }
}
