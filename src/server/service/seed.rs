//! Sample data loader.
//!
//! Wipes every marketplace table and inserts two clients, two verified partners, one super
//! admin and two orders. Run at startup when `SEED_DATABASE` is set.

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::{
    model::{
        enums::{
            AdminRole, OrderStatus, PartnerType, PermissionAction, PermissionModule, PlanType,
            ShootType,
        },
        order::{EventDetailsDto, OrderLocationDto},
        partner::LocationDto,
    },
    server::{
        data::{
            admin::{AdminRepository, CreateAdminParams},
            client::ClientRepository,
            order::OrderRepository,
            partner::PartnerRepository,
        },
        error::AppError,
        model::{
            client::{Address, CreateClientParams},
            order::{CreateOrderParams, OrderState, Pricing},
            partner::{CreatePartnerParams, Ratings, UpdatePartnerParams},
        },
        service::auth::hash_password,
    },
};

/// Row counts inserted by a seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub partners: usize,
    pub admins: usize,
    pub orders: usize,
}

pub struct SeedService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> SeedService<'a> {
    /// Creates a new SeedService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `SeedService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces all data with the sample set.
    ///
    /// # Returns
    /// - `Ok(SeedSummary)` - Number of rows inserted per collection
    /// - `Err(AppError)` - A delete or insert failed; earlier writes are not rolled back
    pub async fn run(&self) -> Result<SeedSummary, AppError> {
        tracing::info!("Seeding database with sample data");

        self.clear().await?;

        let client_repo = ClientRepository::new(self.db);
        let partner_repo = PartnerRepository::new(self.db);
        let order_repo = OrderRepository::new(self.db);

        let password = hash_password("password123").await?;

        let mut clients = Vec::new();
        for params in sample_clients() {
            clients.push(client_repo.create(&params, Some(password.clone())).await?);
        }

        let mut partners = Vec::new();
        for (params, ratings) in sample_partners() {
            let partner = partner_repo.create(&params, Some(password.clone())).await?;
            partner_repo.set_ratings(partner.id, &ratings).await?;
            partner_repo
                .update(
                    partner.id,
                    UpdatePartnerParams {
                        verified: Some(true),
                        ..Default::default()
                    },
                )
                .await?;
            partners.push(partner);
        }

        AdminRepository::new(self.db)
            .create(&sample_admin(), Some(hash_password("admin123").await?))
            .await?;

        let orders = [
            (
                "Wedding Photography Package",
                &clients[0],
                &partners[0],
                Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0),
                25000.0,
                OrderState::Confirmed,
                ("wedding", "John & Sarah's Wedding"),
                ("Grand Ballroom", "Mumbai", "Maharashtra"),
            ),
            (
                "Corporate Event Photography",
                &clients[1],
                &partners[1],
                Utc.with_ymd_and_hms(2024, 7, 20, 14, 0, 0),
                15000.0,
                OrderState::Completed,
                ("corporate", "Annual Company Meeting"),
                ("Business Center", "Delhi", "Delhi"),
            ),
        ];

        let mut order_count = 0;
        for (name, client, partner, event_date_time, price, state, event, location) in orders {
            let Some(event_date_time) = event_date_time.single() else {
                continue;
            };
            let params = CreateOrderParams {
                order_name: name.to_string(),
                client_id: client.id,
                partner_id: partner.id,
                event: EventDetailsDto {
                    event_type: Some(event.0.to_string()),
                    event_name: Some(event.1.to_string()),
                    ..Default::default()
                },
                event_date_time,
                location: OrderLocationDto {
                    venue: Some(location.0.to_string()),
                    city: Some(location.1.to_string()),
                    state: Some(location.2.to_string()),
                    country: Some("India".to_string()),
                },
                pricing: Pricing::compute(price, Vec::new(), 0.0, None, None, None),
                special_instructions: None,
                data_providing_method: Default::default(),
            };

            let order = order_repo.create(&params).await?;
            if state.status() != OrderStatus::Pending {
                order_repo.set_state(order.id, state, None).await?;
            }
            order_count += 1;
        }

        let summary = SeedSummary {
            clients: clients.len(),
            partners: partners.len(),
            admins: 1,
            orders: order_count,
        };

        tracing::info!(
            "Seeded {} clients, {} partners, {} admin and {} orders",
            summary.clients,
            summary.partners,
            summary.admins,
            summary.orders
        );

        Ok(summary)
    }

    /// Deletes every row, children before parents.
    async fn clear(&self) -> Result<(), AppError> {
        use entity::prelude::*;

        PartnerReview::delete_many().exec(self.db).await?;
        ClientFavouritePartner::delete_many().exec(self.db).await?;
        Order::delete_many().exec(self.db).await?;
        PartnerShootType::delete_many().exec(self.db).await?;
        PartnerSpecialization::delete_many().exec(self.db).await?;
        PartnerLocation::delete_many().exec(self.db).await?;
        PartnerPackage::delete_many().exec(self.db).await?;
        PartnerBlackoutDate::delete_many().exec(self.db).await?;
        Partner::delete_many().exec(self.db).await?;
        Client::delete_many().exec(self.db).await?;
        AdminPermission::delete_many().exec(self.db).await?;
        Admin::delete_many().exec(self.db).await?;

        tracing::info!("Cleared existing data");
        Ok(())
    }
}

fn sample_clients() -> Vec<CreateClientParams> {
    let client = |username: &str, email: &str, phone: &str, city: &str, state: &str, plan: PlanType| {
        CreateClientParams {
            username: username.to_string(),
            email: email.to_string(),
            password: None,
            phone_no: phone.to_string(),
            address: Address {
                city: Some(city.to_string()),
                state: Some(state.to_string()),
                country: Some("USA".to_string()),
                ..Default::default()
            },
            plan_type: plan,
            identity_uid: None,
        }
    };

    vec![
        client("john_doe", "john@example.com", "+1234567890", "New York", "NY", PlanType::Premium),
        client("jane_smith", "jane@example.com", "+1234567891", "Los Angeles", "CA", PlanType::Free),
    ]
}

/// Seeded aggregates carry review totals without backing review rows.
fn seeded_ratings(average: f64, total: i32) -> Ratings {
    Ratings {
        average,
        total,
        breakdown: [0; 5],
    }
}

fn sample_partners() -> Vec<(CreatePartnerParams, Ratings)> {
    let partner = |username: &str,
                   company_name: &str,
                   email: &str,
                   phone: &str,
                   shoot_types: Vec<ShootType>,
                   partner_type: PartnerType,
                   price: f64,
                   years: i32,
                   city: &str| CreatePartnerParams {
        username: username.to_string(),
        company_name: company_name.to_string(),
        email: email.to_string(),
        password: None,
        phone_no: phone.to_string(),
        address: Address::default(),
        years_of_experience: Some(years),
        partner_type,
        plan_type: PlanType::Free,
        shoot_types,
        specializations: Vec::new(),
        locations: vec![LocationDto {
            city: city.to_string(),
            state: Some(if city == "Mumbai" { "Maharashtra" } else { city }.to_string()),
            country: Some("India".to_string()),
            service_radius: None,
            travel_charges: None,
        }],
        packages: Vec::new(),
        price_per_day: Some(price),
        identity_uid: None,
    };

    vec![
        (
            partner(
                "photo_pro",
                "Pro Photography Studio",
                "photographer@example.com",
                "+1234567892",
                vec![ShootType::Wedding, ShootType::Portrait, ShootType::Event],
                PartnerType::Company,
                15000.0,
                5,
                "Mumbai",
            ),
            seeded_ratings(4.5, 25),
        ),
        (
            partner(
                "creative_lens",
                "Creative Lens Photography",
                "creative@example.com",
                "+1234567893",
                vec![ShootType::Fashion, ShootType::Commercial, ShootType::Product],
                PartnerType::Individual,
                20000.0,
                8,
                "Delhi",
            ),
            seeded_ratings(4.8, 42),
        ),
    ]
}

fn sample_admin() -> CreateAdminParams {
    use PermissionAction::*;

    let mut grants = Vec::new();
    for (module, actions) in [
        (PermissionModule::Users, vec![Create, Read, Update, Delete]),
        (PermissionModule::Partners, vec![Create, Read, Update, Delete, Approve]),
        (PermissionModule::Orders, vec![Create, Read, Update, Delete]),
    ] {
        grants.extend(actions.into_iter().map(|action| (module, action)));
    }

    CreateAdminParams {
        username: "admin".to_string(),
        email: "admin@pixisphere.com".to_string(),
        phone_no: Some("+1234567894".to_string()),
        role: AdminRole::SuperAdmin,
        grants,
    }
}
