//! Partner service for business logic.
//!
//! Partner listings and search, sign-up, profile updates, availability lookups and
//! reviews. Adding a review recomputes the partner's rating aggregate from every stored
//! review.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        enums::{ActivityKind, PartnerSort},
        partner::AvailabilityResponseDto,
    },
    server::{
        data::{
            client::ClientRepository, order::OrderRepository, partner::PartnerRepository,
            review::ReviewRepository,
        },
        error::AppError,
        filter::partner::{
            build_partner_filter, build_partner_search_filter, PartnerFilterParams,
            PartnerSearchParams,
        },
        model::{
            client::activity,
            listing::{ListQuery, Page},
            partner::{
                CreatePartnerParams, CreateReviewParams, Partner, Ratings, Review,
                UpdatePartnerParams,
            },
        },
        service::auth::hash_password,
    },
};

/// Most partners a search returns.
pub const SEARCH_LIMIT: u64 = 20;

pub struct PartnerService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> PartnerService<'a> {
    /// Creates a new PartnerService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PartnerService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        filters: &PartnerFilterParams,
        query: &ListQuery<PartnerSort>,
    ) -> Result<Page<Partner>, AppError> {
        let filter = build_partner_filter(filters, query.search.as_deref());
        tracing::debug!("Partner filter: {}", filter.to_json());

        PartnerRepository::new(self.db)
            .get_paginated(&filter, query)
            .await
    }

    /// Active, verified partners matching the search criteria, best rated first.
    ///
    /// A `date` excludes partners blacked out on that day; a `budget` keeps partners whose
    /// day rate or any active package fits it.
    pub async fn search(&self, params: &PartnerSearchParams) -> Result<Vec<Partner>, AppError> {
        let filter = build_partner_search_filter(params);
        tracing::debug!("Partner search filter: {}", filter.to_json());

        PartnerRepository::new(self.db)
            .search(&filter, SEARCH_LIMIT)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Partner>, AppError> {
        PartnerRepository::new(self.db).find_by_id(id).await
    }

    /// Creates a partner account from a public sign-up.
    ///
    /// # Returns
    /// - `Ok(Partner)` - The created partner
    /// - `Err(AppError::Conflict)` - Email or username already registered
    pub async fn create(&self, params: CreatePartnerParams) -> Result<Partner, AppError> {
        let partner_repo = PartnerRepository::new(self.db);
        if partner_repo
            .is_taken(Some(&params.email), Some(&params.username), None)
            .await?
        {
            return Err(AppError::Conflict(
                "Partner with this email or username already exists".to_string(),
            ));
        }

        let password_hash = match &params.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };
        let partner = partner_repo.create(&params, password_hash).await?;

        tracing::info!("Created partner {} ({})", partner.id, partner.partner_code);

        Ok(partner)
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Partner))` - The updated partner
    /// - `Ok(None)` - No partner with that id
    /// - `Err(AppError::Conflict)` - New email or username belongs to another partner
    pub async fn update(
        &self,
        id: i32,
        params: UpdatePartnerParams,
    ) -> Result<Option<Partner>, AppError> {
        let partner_repo = PartnerRepository::new(self.db);
        if partner_repo
            .is_taken(params.email.as_deref(), params.username.as_deref(), Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                "Partner with this email or username already exists".to_string(),
            ));
        }

        partner_repo.update(id, params).await
    }

    /// Availability for one day when `date` is given, otherwise the weekly schedule with
    /// blackout dates, narrowed to `month` when given.
    ///
    /// # Returns
    /// - `Ok(Some(AvailabilityResponseDto))` - Partner found
    /// - `Ok(None)` - No partner with that id
    pub async fn availability(
        &self,
        id: i32,
        date: Option<NaiveDate>,
        month: Option<(i32, u32)>,
    ) -> Result<Option<AvailabilityResponseDto>, AppError> {
        let Some(partner) = PartnerRepository::new(self.db).find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(match date {
            Some(date) => AvailabilityResponseDto::Date(partner.availability_on(date)),
            None => AvailabilityResponseDto::Calendar(partner.calendar(month)),
        }))
    }

    /// Stores a client's review and recomputes the partner's rating aggregate.
    ///
    /// # Returns
    /// - `Ok(Some((Review, Ratings)))` - The stored review and the new aggregate
    /// - `Ok(None)` - No partner with that id
    /// - `Err(AppError::BadRequest)` - The referenced order is not between this client and partner
    pub async fn add_review(
        &self,
        params: CreateReviewParams,
    ) -> Result<Option<(Review, Ratings)>, AppError> {
        let partner_repo = PartnerRepository::new(self.db);
        if partner_repo.find_by_id(params.partner_id).await?.is_none() {
            return Ok(None);
        }

        if let Some(order_id) = params.order_id {
            let order = OrderRepository::new(self.db).find_by_id(order_id).await?;
            let matches = order.is_some_and(|o| {
                o.client_id == params.client_id && o.partner_id == params.partner_id
            });
            if !matches {
                return Err(AppError::BadRequest(
                    "Order does not belong to this client and partner".to_string(),
                ));
            }
        }

        let review_repo = ReviewRepository::new(self.db);
        let review = review_repo.create(&params).await?;

        let ratings = Ratings::from_reviews(&review_repo.ratings_for_partner(params.partner_id).await?);
        partner_repo.set_ratings(params.partner_id, &ratings).await?;

        ClientRepository::new(self.db)
            .append_activity(
                params.client_id,
                activity(
                    ActivityKind::ReviewGiven,
                    format!("Reviewed partner with {} stars", params.rating),
                    Some(params.partner_id),
                ),
            )
            .await?;

        tracing::info!(
            "Client {} reviewed partner {}; average now {}",
            params.client_id,
            params.partner_id,
            ratings.average
        );

        Ok(Some((review, ratings)))
    }
}
