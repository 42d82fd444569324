//! Partner factory for creating test partner accounts and their child rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test partners with customizable fields.
///
/// Shoot types, locations and blackout dates are inserted into their child tables after the
/// partner row, so the builder requires those tables to exist when they are set.
///
/// # Example
///
/// ```rust,ignore
/// let partner = PartnerFactory::new(&db)
///     .username("creative_lens")
///     .verified(true)
///     .rating(4.8, 42)
///     .shoot_types(["fashion", "commercial"])
///     .city("Delhi")
///     .build()
///     .await?;
/// ```
pub struct PartnerFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    company_name: String,
    email: String,
    identity_uid: Option<String>,
    password_hash: Option<String>,
    partner_type: String,
    plan_type: String,
    price_per_day: Option<f64>,
    years_of_experience: Option<i32>,
    rating_average: f64,
    rating_total: i32,
    verified: bool,
    is_active: bool,
    total_revenue: f64,
    created_at: DateTime<Utc>,
    shoot_types: Vec<String>,
    specializations: Vec<String>,
    cities: Vec<String>,
    blackout_dates: Vec<NaiveDate>,
    package_prices: Vec<f64>,
}

impl<'a> PartnerFactory<'a> {
    /// Creates a new PartnerFactory with default values.
    ///
    /// Defaults:
    /// - username: `"partner_{id}"`, company_name: `"Studio {id}"`
    /// - partner_type: `"individual"`, plan_type: `"free"`
    /// - unverified, active, no rating, no child rows
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: format!("partner_{}", id),
            company_name: format!("Studio {}", id),
            email: format!("partner_{}@example.com", id),
            identity_uid: None,
            password_hash: None,
            partner_type: "individual".to_string(),
            plan_type: "free".to_string(),
            price_per_day: None,
            years_of_experience: None,
            rating_average: 0.0,
            rating_total: 0,
            verified: false,
            is_active: true,
            total_revenue: 0.0,
            created_at: Utc::now(),
            shoot_types: Vec::new(),
            specializations: Vec::new(),
            cities: Vec::new(),
            blackout_dates: Vec::new(),
            package_prices: Vec::new(),
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = company_name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn identity_uid(mut self, uid: impl Into<String>) -> Self {
        self.identity_uid = Some(uid.into());
        self
    }

    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn partner_type(mut self, partner_type: impl Into<String>) -> Self {
        self.partner_type = partner_type.into();
        self
    }

    pub fn plan_type(mut self, plan_type: impl Into<String>) -> Self {
        self.plan_type = plan_type.into();
        self
    }

    pub fn price_per_day(mut self, price: f64) -> Self {
        self.price_per_day = Some(price);
        self
    }

    pub fn years_of_experience(mut self, years: i32) -> Self {
        self.years_of_experience = Some(years);
        self
    }

    /// Sets the stored rating aggregate without creating review rows.
    pub fn rating(mut self, average: f64, total: i32) -> Self {
        self.rating_average = average;
        self.rating_total = total;
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn total_revenue(mut self, total_revenue: f64) -> Self {
        self.total_revenue = total_revenue;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn shoot_types<I, S>(mut self, shoot_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shoot_types = shoot_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn specializations<I, S>(mut self, specializations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specializations = specializations.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a service location in the given city.
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.cities.push(city.into());
        self
    }

    pub fn blackout_date(mut self, date: NaiveDate) -> Self {
        self.blackout_dates.push(date);
        self
    }

    /// Adds an active package with the given price.
    pub fn package_price(mut self, price: f64) -> Self {
        self.package_prices.push(price);
        self
    }

    /// Builds and inserts the partner and its child rows.
    ///
    /// # Returns
    /// - `Ok(entity::partner::Model)` - Created partner
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::partner::Model, DbErr> {
        let partner = entity::partner::ActiveModel {
            partner_code: ActiveValue::Set(format!("PAR_TEST_{}", next_id())),
            identity_uid: ActiveValue::Set(self.identity_uid),
            username: ActiveValue::Set(self.username),
            company_name: ActiveValue::Set(self.company_name),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            phone_no: ActiveValue::Set("+1234567892".to_string()),
            profile_pic_url: ActiveValue::Set(None),
            banner_url: ActiveValue::Set(None),
            street: ActiveValue::Set(None),
            city: ActiveValue::Set(None),
            state: ActiveValue::Set(None),
            country: ActiveValue::Set(None),
            zip_code: ActiveValue::Set(None),
            years_of_experience: ActiveValue::Set(self.years_of_experience),
            plan_type: ActiveValue::Set(self.plan_type),
            partner_type: ActiveValue::Set(self.partner_type),
            price_per_day: ActiveValue::Set(self.price_per_day),
            rating_average: ActiveValue::Set(self.rating_average),
            rating_total: ActiveValue::Set(self.rating_total),
            rating_five: ActiveValue::Set(0),
            rating_four: ActiveValue::Set(0),
            rating_three: ActiveValue::Set(0),
            rating_two: ActiveValue::Set(0),
            rating_one: ActiveValue::Set(0),
            verified: ActiveValue::Set(self.verified),
            availability_schedule: ActiveValue::Set(serde_json::json!([])),
            timezone: ActiveValue::Set(None),
            total_revenue: ActiveValue::Set(self.total_revenue),
            transactions: ActiveValue::Set(serde_json::json!([])),
            is_active: ActiveValue::Set(self.is_active),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for shoot_type in self.shoot_types {
            entity::partner_shoot_type::ActiveModel {
                partner_id: ActiveValue::Set(partner.id),
                shoot_type: ActiveValue::Set(shoot_type),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        for name in self.specializations {
            entity::partner_specialization::ActiveModel {
                partner_id: ActiveValue::Set(partner.id),
                name: ActiveValue::Set(name),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        for city in self.cities {
            entity::partner_location::ActiveModel {
                partner_id: ActiveValue::Set(partner.id),
                city: ActiveValue::Set(city),
                state: ActiveValue::Set(None),
                country: ActiveValue::Set(None),
                service_radius: ActiveValue::Set(None),
                travel_charges: ActiveValue::Set(None),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        for date in self.blackout_dates {
            entity::partner_blackout_date::ActiveModel {
                partner_id: ActiveValue::Set(partner.id),
                date: ActiveValue::Set(date),
                reason: ActiveValue::Set(None),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        for price in self.package_prices {
            entity::partner_package::ActiveModel {
                partner_id: ActiveValue::Set(partner.id),
                name: ActiveValue::Set(format!("Package {}", next_id())),
                description: ActiveValue::Set(None),
                price: ActiveValue::Set(price),
                duration: ActiveValue::Set(None),
                inclusions: ActiveValue::Set(serde_json::json!([])),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(partner)
    }
}

/// Creates a partner with default values and no child rows.
pub async fn create_partner(db: &DatabaseConnection) -> Result<entity::partner::Model, DbErr> {
    PartnerFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    #[tokio::test]
    async fn creates_partner_with_child_rows() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let partner = PartnerFactory::new(db)
            .shoot_types(["wedding", "portrait"])
            .city("Mumbai")
            .build()
            .await?;

        let shoot_types = PartnerShootType::find()
            .filter(entity::partner_shoot_type::Column::PartnerId.eq(partner.id))
            .count(db)
            .await?;
        let locations = PartnerLocation::find()
            .filter(entity::partner_location::Column::PartnerId.eq(partner.id))
            .count(db)
            .await?;

        assert_eq!(shoot_types, 2);
        assert_eq!(locations, 1);

        Ok(())
    }
}
