//! Partner data repository for database operations.
//!
//! Partners span the `partner` table and five child tables (shoot types, specializations,
//! locations, packages and blackout dates). Children are batch loaded with one query per
//! table for any number of partners, and replaced wholesale on update.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::{
        enums::{PartnerSort, ShootType},
        partner::{BlackoutDateDto, LocationDto, PackageDto, TransactionDto},
    },
    server::{
        data::{
            client::{appended, sort_order},
            condition::to_condition,
        },
        error::AppError,
        filter::{partner::PartnerField, FilterDocument},
        model::{
            listing::{ListQuery, Page},
            partner::{CreatePartnerParams, Partner, PartnerChildren, Ratings, UpdatePartnerParams},
        },
        util::code::generate_code,
    },
};

fn json_value<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Failed to encode JSON column: {}", e)))
}

/// Repository providing database operations for partners and their child rows.
pub struct PartnerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PartnerRepository<'a> {
    /// Creates a new PartnerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PartnerRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a partner with a fresh `PAR_` code, then its child rows.
    ///
    /// # Arguments
    /// - `params` - Validated sign-up fields
    /// - `password_hash` - bcrypt hash, `None` for identity-only accounts
    ///
    /// # Returns
    /// - `Ok(Partner)` - The created partner with children
    /// - `Err(AppError::DbErr)` - Insert failed, including unique violations
    pub async fn create(
        &self,
        params: &CreatePartnerParams,
        password_hash: Option<String>,
    ) -> Result<Partner, AppError> {
        let now = Utc::now();
        let entity = entity::partner::ActiveModel {
            partner_code: ActiveValue::Set(generate_code("PAR")),
            identity_uid: ActiveValue::Set(params.identity_uid.clone()),
            username: ActiveValue::Set(params.username.clone()),
            company_name: ActiveValue::Set(params.company_name.clone()),
            email: ActiveValue::Set(params.email.clone()),
            password_hash: ActiveValue::Set(password_hash),
            phone_no: ActiveValue::Set(params.phone_no.clone()),
            profile_pic_url: ActiveValue::Set(None),
            banner_url: ActiveValue::Set(None),
            street: ActiveValue::Set(params.address.street.clone()),
            city: ActiveValue::Set(params.address.city.clone()),
            state: ActiveValue::Set(params.address.state.clone()),
            country: ActiveValue::Set(params.address.country.clone()),
            zip_code: ActiveValue::Set(params.address.zip_code.clone()),
            years_of_experience: ActiveValue::Set(params.years_of_experience),
            plan_type: ActiveValue::Set(params.plan_type.to_string()),
            partner_type: ActiveValue::Set(params.partner_type.to_string()),
            price_per_day: ActiveValue::Set(params.price_per_day),
            rating_average: ActiveValue::Set(0.0),
            rating_total: ActiveValue::Set(0),
            rating_five: ActiveValue::Set(0),
            rating_four: ActiveValue::Set(0),
            rating_three: ActiveValue::Set(0),
            rating_two: ActiveValue::Set(0),
            rating_one: ActiveValue::Set(0),
            verified: ActiveValue::Set(false),
            availability_schedule: ActiveValue::Set(serde_json::json!([])),
            timezone: ActiveValue::Set(None),
            total_revenue: ActiveValue::Set(0.0),
            transactions: ActiveValue::Set(serde_json::json!([])),
            is_active: ActiveValue::Set(true),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.insert_shoot_types(entity.id, &params.shoot_types).await?;
        self.insert_specializations(entity.id, &params.specializations)
            .await?;
        self.insert_locations(entity.id, &params.locations).await?;
        self.insert_packages(entity.id, &params.packages).await?;

        self.assemble_one(entity).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Partner>, AppError> {
        match entity::prelude::Partner::find_by_id(id).one(self.db).await? {
            Some(entity) => self.assemble_one(entity).await.map(Some),
            None => Ok(None),
        }
    }

    /// Loads several partners, keyed by id. Unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, Partner>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let entities = entity::prelude::Partner::find()
            .filter(entity::partner::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(self
            .assemble(entities)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Partner>, AppError> {
        match entity::prelude::Partner::find()
            .filter(entity::partner::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?
        {
            Some(entity) => self.assemble_one(entity).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn find_by_identity_uid(&self, uid: &str) -> Result<Option<Partner>, AppError> {
        match entity::prelude::Partner::find()
            .filter(entity::partner::Column::IdentityUid.eq(uid))
            .one(self.db)
            .await?
        {
            Some(entity) => self.assemble_one(entity).await.map(Some),
            None => Ok(None),
        }
    }

    /// Checks whether another partner already uses the email or username.
    pub async fn is_taken(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        except_id: Option<i32>,
    ) -> Result<bool, AppError> {
        if email.is_none() && username.is_none() {
            return Ok(false);
        }

        let count = entity::prelude::Partner::find()
            .filter(
                Condition::any()
                    .add_option(email.map(|e| entity::partner::Column::Email.eq(e.to_lowercase())))
                    .add_option(username.map(|u| entity::partner::Column::Username.eq(u))),
            )
            .filter(
                Condition::all()
                    .add_option(except_id.map(|id| entity::partner::Column::Id.ne(id))),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets one page of partners matching the filter document.
    ///
    /// # Returns
    /// - `Ok(Page<Partner>)` - Requested page with children and the total match count
    /// - `Err(AppError)` - Query failed or a row could not be converted
    pub async fn get_paginated(
        &self,
        filter: &FilterDocument<PartnerField>,
        query: &ListQuery<PartnerSort>,
    ) -> Result<Page<Partner>, AppError> {
        let column = match query.sort_by.unwrap_or(PartnerSort::CreatedAt) {
            PartnerSort::CreatedAt => entity::partner::Column::CreatedAt,
            PartnerSort::Username => entity::partner::Column::Username,
            PartnerSort::CompanyName => entity::partner::Column::CompanyName,
            PartnerSort::Rating => entity::partner::Column::RatingAverage,
            PartnerSort::PricePerDay => entity::partner::Column::PricePerDay,
        };

        let paginator = entity::prelude::Partner::find()
            .filter(to_condition(filter))
            .order_by(column, sort_order(query.sort_order))
            .order_by_asc(entity::partner::Column::Id)
            .paginate(self.db, query.limit);

        let total = paginator.num_items().await?;
        let entities = if query.is_past_end(total) {
            Vec::new()
        } else {
            paginator.fetch_page(query.page.saturating_sub(1)).await?
        };

        Ok(Page {
            items: self.assemble(entities).await?,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    /// Partners matching a search document, best rated first and verified before unverified.
    pub async fn search(
        &self,
        filter: &FilterDocument<PartnerField>,
        limit: u64,
    ) -> Result<Vec<Partner>, AppError> {
        let entities = entity::prelude::Partner::find()
            .filter(to_condition(filter))
            .order_by_desc(entity::partner::Column::RatingAverage)
            .order_by_desc(entity::partner::Column::Verified)
            .order_by_asc(entity::partner::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        self.assemble(entities).await
    }

    /// Verified, active partners with the best rating, then most reviews.
    pub async fn top_rated(&self, limit: u64) -> Result<Vec<Partner>, AppError> {
        let entities = entity::prelude::Partner::find()
            .filter(entity::partner::Column::Verified.eq(true))
            .filter(entity::partner::Column::IsActive.eq(true))
            .order_by_desc(entity::partner::Column::RatingAverage)
            .order_by_desc(entity::partner::Column::RatingTotal)
            .order_by_asc(entity::partner::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        self.assemble(entities).await
    }

    pub async fn count(&self, filter: &FilterDocument<PartnerField>) -> Result<u64, AppError> {
        Ok(entity::prelude::Partner::find()
            .filter(to_condition(filter))
            .count(self.db)
            .await?)
    }

    /// Creation timestamps of partners created at or after `since`.
    pub async fn created_since(&self, since: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError> {
        Ok(entity::prelude::Partner::find()
            .select_only()
            .column(entity::partner::Column::CreatedAt)
            .filter(entity::partner::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?)
    }

    pub async fn count_logged_in_since(&self, since: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(entity::prelude::Partner::find()
            .filter(entity::partner::Column::LastLogin.gte(since))
            .count(self.db)
            .await?)
    }

    /// Applies a partial update. Child collections that are present replace stored rows.
    ///
    /// # Returns
    /// - `Ok(Some(Partner))` - The updated partner
    /// - `Ok(None)` - No partner with that id
    /// - `Err(AppError)` - Update failed, including unique violations
    pub async fn update(
        &self,
        id: i32,
        params: UpdatePartnerParams,
    ) -> Result<Option<Partner>, AppError> {
        let Some(existing) = entity::prelude::Partner::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut model: entity::partner::ActiveModel = existing.into();
        if let Some(username) = params.username {
            model.username = ActiveValue::Set(username);
        }
        if let Some(company_name) = params.company_name {
            model.company_name = ActiveValue::Set(company_name);
        }
        if let Some(email) = params.email {
            model.email = ActiveValue::Set(email);
        }
        if let Some(phone_no) = params.phone_no {
            model.phone_no = ActiveValue::Set(phone_no);
        }
        if let Some(profile_pic) = params.profile_pic {
            model.profile_pic_url = ActiveValue::Set(Some(profile_pic));
        }
        if let Some(banner_image) = params.banner_image {
            model.banner_url = ActiveValue::Set(Some(banner_image));
        }
        if let Some(address) = params.address {
            model.street = ActiveValue::Set(address.street);
            model.city = ActiveValue::Set(address.city);
            model.state = ActiveValue::Set(address.state);
            model.country = ActiveValue::Set(address.country);
            model.zip_code = ActiveValue::Set(address.zip_code);
        }
        if let Some(years) = params.years_of_experience {
            model.years_of_experience = ActiveValue::Set(Some(years));
        }
        if let Some(partner_type) = params.partner_type {
            model.partner_type = ActiveValue::Set(partner_type.to_string());
        }
        if let Some(plan_type) = params.plan_type {
            model.plan_type = ActiveValue::Set(plan_type.to_string());
        }
        if let Some(price) = params.price_per_day {
            model.price_per_day = ActiveValue::Set(Some(price));
        }
        if let Some(schedule) = &params.schedule {
            model.availability_schedule = ActiveValue::Set(json_value(schedule)?);
        }
        if let Some(timezone) = params.timezone {
            model.timezone = ActiveValue::Set(Some(timezone));
        }
        if let Some(verified) = params.verified {
            model.verified = ActiveValue::Set(verified);
        }
        if let Some(is_active) = params.is_active {
            model.is_active = ActiveValue::Set(is_active);
        }
        model.updated_at = ActiveValue::Set(Utc::now());
        let entity = model.update(self.db).await?;

        if let Some(shoot_types) = &params.shoot_types {
            entity::prelude::PartnerShootType::delete_many()
                .filter(entity::partner_shoot_type::Column::PartnerId.eq(id))
                .exec(self.db)
                .await?;
            self.insert_shoot_types(id, shoot_types).await?;
        }
        if let Some(specializations) = &params.specializations {
            entity::prelude::PartnerSpecialization::delete_many()
                .filter(entity::partner_specialization::Column::PartnerId.eq(id))
                .exec(self.db)
                .await?;
            self.insert_specializations(id, specializations).await?;
        }
        if let Some(locations) = &params.locations {
            entity::prelude::PartnerLocation::delete_many()
                .filter(entity::partner_location::Column::PartnerId.eq(id))
                .exec(self.db)
                .await?;
            self.insert_locations(id, locations).await?;
        }
        if let Some(packages) = &params.packages {
            entity::prelude::PartnerPackage::delete_many()
                .filter(entity::partner_package::Column::PartnerId.eq(id))
                .exec(self.db)
                .await?;
            self.insert_packages(id, packages).await?;
        }
        if let Some(blackout_dates) = &params.blackout_dates {
            entity::prelude::PartnerBlackoutDate::delete_many()
                .filter(entity::partner_blackout_date::Column::PartnerId.eq(id))
                .exec(self.db)
                .await?;
            self.insert_blackout_dates(id, blackout_dates).await?;
        }

        self.assemble_one(entity).await.map(Some)
    }

    /// Stores a recomputed rating aggregate.
    pub async fn set_ratings(&self, id: i32, ratings: &Ratings) -> Result<(), AppError> {
        let [five, four, three, two, one] = ratings.breakdown;
        entity::partner::ActiveModel {
            id: ActiveValue::Unchanged(id),
            rating_average: ActiveValue::Set(ratings.average),
            rating_total: ActiveValue::Set(ratings.total),
            rating_five: ActiveValue::Set(five),
            rating_four: ActiveValue::Set(four),
            rating_three: ActiveValue::Set(three),
            rating_two: ActiveValue::Set(two),
            rating_one: ActiveValue::Set(one),
            ..Default::default()
        }
        .update(self.db)
        .await?;
        Ok(())
    }

    /// Adds `amount` (negative for refunds) to total revenue and logs the transaction.
    ///
    /// Missing partners are ignored.
    pub async fn record_transaction(
        &self,
        id: i32,
        transaction: TransactionDto,
        amount: f64,
    ) -> Result<(), AppError> {
        let Some(existing) = entity::prelude::Partner::find_by_id(id).one(self.db).await? else {
            return Ok(());
        };

        let total_revenue = existing.total_revenue + amount;
        let transactions = appended(&existing.transactions, transaction)?;
        let mut model: entity::partner::ActiveModel = existing.into();
        model.total_revenue = ActiveValue::Set(total_revenue);
        model.transactions = ActiveValue::Set(transactions);
        model.update(self.db).await?;
        Ok(())
    }

    pub async fn set_last_login(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::Partner::update_many()
            .filter(entity::partner::Column::Id.eq(id))
            .col_expr(
                entity::partner::Column::LastLogin,
                sea_orm::sea_query::Expr::value(Some(Utc::now())),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn link_identity(&self, id: i32, uid: &str) -> Result<(), AppError> {
        entity::prelude::Partner::update_many()
            .filter(entity::partner::Column::Id.eq(id))
            .col_expr(
                entity::partner::Column::IdentityUid,
                sea_orm::sea_query::Expr::value(Some(uid.to_string())),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    async fn insert_shoot_types(&self, partner_id: i32, shoot_types: &[ShootType]) -> Result<(), DbErr> {
        if shoot_types.is_empty() {
            return Ok(());
        }
        entity::prelude::PartnerShootType::insert_many(shoot_types.iter().map(|s| {
            entity::partner_shoot_type::ActiveModel {
                partner_id: ActiveValue::Set(partner_id),
                shoot_type: ActiveValue::Set(s.to_string()),
                ..Default::default()
            }
        }))
        .exec(self.db)
        .await?;
        Ok(())
    }

    async fn insert_specializations(&self, partner_id: i32, names: &[String]) -> Result<(), DbErr> {
        if names.is_empty() {
            return Ok(());
        }
        entity::prelude::PartnerSpecialization::insert_many(names.iter().map(|name| {
            entity::partner_specialization::ActiveModel {
                partner_id: ActiveValue::Set(partner_id),
                name: ActiveValue::Set(name.clone()),
                ..Default::default()
            }
        }))
        .exec(self.db)
        .await?;
        Ok(())
    }

    async fn insert_locations(&self, partner_id: i32, locations: &[LocationDto]) -> Result<(), DbErr> {
        if locations.is_empty() {
            return Ok(());
        }
        entity::prelude::PartnerLocation::insert_many(locations.iter().map(|l| {
            entity::partner_location::ActiveModel {
                partner_id: ActiveValue::Set(partner_id),
                city: ActiveValue::Set(l.city.clone()),
                state: ActiveValue::Set(l.state.clone()),
                country: ActiveValue::Set(l.country.clone()),
                service_radius: ActiveValue::Set(l.service_radius),
                travel_charges: ActiveValue::Set(l.travel_charges),
                ..Default::default()
            }
        }))
        .exec(self.db)
        .await?;
        Ok(())
    }

    async fn insert_packages(&self, partner_id: i32, packages: &[PackageDto]) -> Result<(), AppError> {
        if packages.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        let models = packages
            .iter()
            .map(|p| {
                Ok(entity::partner_package::ActiveModel {
                    partner_id: ActiveValue::Set(partner_id),
                    name: ActiveValue::Set(p.name.clone()),
                    description: ActiveValue::Set(p.description.clone()),
                    price: ActiveValue::Set(p.price),
                    duration: ActiveValue::Set(p.duration.clone()),
                    inclusions: ActiveValue::Set(json_value(&p.inclusions)?),
                    is_active: ActiveValue::Set(p.is_active),
                    created_at: ActiveValue::Set(now),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        entity::prelude::PartnerPackage::insert_many(models)
            .exec(self.db)
            .await?;
        Ok(())
    }

    async fn insert_blackout_dates(
        &self,
        partner_id: i32,
        dates: &[BlackoutDateDto],
    ) -> Result<(), DbErr> {
        if dates.is_empty() {
            return Ok(());
        }
        entity::prelude::PartnerBlackoutDate::insert_many(dates.iter().map(|b| {
            entity::partner_blackout_date::ActiveModel {
                partner_id: ActiveValue::Set(partner_id),
                date: ActiveValue::Set(b.date),
                reason: ActiveValue::Set(b.reason.clone()),
                ..Default::default()
            }
        }))
        .exec(self.db)
        .await?;
        Ok(())
    }

    async fn assemble_one(&self, entity: entity::partner::Model) -> Result<Partner, AppError> {
        let mut children = self.load_children(&[entity.id]).await?;
        let own = children.remove(&entity.id).unwrap_or_default();
        Partner::from_entity(entity, own)
    }

    /// Converts rows to domain models, preserving their order.
    async fn assemble(&self, entities: Vec<entity::partner::Model>) -> Result<Vec<Partner>, AppError> {
        let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();
        let mut children = self.load_children(&ids).await?;

        entities
            .into_iter()
            .map(|entity| {
                let own = children.remove(&entity.id).unwrap_or_default();
                Partner::from_entity(entity, own)
            })
            .collect()
    }

    async fn load_children(&self, ids: &[i32]) -> Result<HashMap<i32, PartnerChildren>, DbErr> {
        let mut children: HashMap<i32, PartnerChildren> = HashMap::new();
        if ids.is_empty() {
            return Ok(children);
        }

        for row in entity::prelude::PartnerShootType::find()
            .filter(entity::partner_shoot_type::Column::PartnerId.is_in(ids.iter().copied()))
            .order_by_asc(entity::partner_shoot_type::Column::Id)
            .all(self.db)
            .await?
        {
            children.entry(row.partner_id).or_default().shoot_types.push(row);
        }

        for row in entity::prelude::PartnerSpecialization::find()
            .filter(entity::partner_specialization::Column::PartnerId.is_in(ids.iter().copied()))
            .order_by_asc(entity::partner_specialization::Column::Id)
            .all(self.db)
            .await?
        {
            children.entry(row.partner_id).or_default().specializations.push(row);
        }

        for row in entity::prelude::PartnerLocation::find()
            .filter(entity::partner_location::Column::PartnerId.is_in(ids.iter().copied()))
            .order_by_asc(entity::partner_location::Column::Id)
            .all(self.db)
            .await?
        {
            children.entry(row.partner_id).or_default().locations.push(row);
        }

        for row in entity::prelude::PartnerPackage::find()
            .filter(entity::partner_package::Column::PartnerId.is_in(ids.iter().copied()))
            .order_by_asc(entity::partner_package::Column::Id)
            .all(self.db)
            .await?
        {
            children.entry(row.partner_id).or_default().packages.push(row);
        }

        for row in entity::prelude::PartnerBlackoutDate::find()
            .filter(entity::partner_blackout_date::Column::PartnerId.is_in(ids.iter().copied()))
            .order_by_asc(entity::partner_blackout_date::Column::Date)
            .all(self.db)
            .await?
        {
            children.entry(row.partner_id).or_default().blackout_dates.push(row);
        }

        Ok(children)
    }
}
