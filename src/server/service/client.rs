//! Client service for business logic.
//!
//! Sign-up, profile management, favourite partners and the per-client order history.
//! Profile edits and favourites are recorded in the client's activity log.

use sea_orm::DatabaseConnection;

use crate::{
    model::enums::{ActivityKind, ClientSort, OrderSort},
    server::{
        data::{client::ClientRepository, order::OrderRepository, partner::PartnerRepository},
        error::AppError,
        filter::{
            client::{build_client_filter, ClientFilterParams},
            order::{build_client_order_filter, ClientOrderFilterParams, OrderField},
            FilterDocument, FilterValue,
        },
        model::{
            client::{activity, Client, ClientDetail, CreateClientParams, UpdateClientParams},
            listing::{ListQuery, Page},
            order::Order,
        },
        service::auth::hash_password,
    },
};

/// Orders embedded in the client detail view.
const DETAIL_RECENT_ORDERS: u64 = 10;

pub struct ClientService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> ClientService<'a> {
    /// Creates a new ClientService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ClientService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists clients matching the filters, one page at a time.
    pub async fn list(
        &self,
        filters: &ClientFilterParams,
        query: &ListQuery<ClientSort>,
    ) -> Result<Page<Client>, AppError> {
        let filter = build_client_filter(filters, query.search.as_deref());
        tracing::debug!("Client filter: {}", filter.to_json());

        ClientRepository::new(self.db)
            .get_paginated(&filter, query)
            .await
    }

    /// Loads a client with favourite partners and most recent orders.
    ///
    /// Favourites whose partner has since been deleted are skipped.
    ///
    /// # Returns
    /// - `Ok(Some(ClientDetail))` - Client found
    /// - `Ok(None)` - No client with that id
    pub async fn get_detail(&self, id: i32) -> Result<Option<ClientDetail>, AppError> {
        let client_repo = ClientRepository::new(self.db);
        let Some(client) = client_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let favourites = client_repo.favourites(id).await?;
        let partner_ids: Vec<i32> = favourites.iter().map(|(partner_id, _)| *partner_id).collect();
        let mut partners = PartnerRepository::new(self.db)
            .find_by_ids(&partner_ids)
            .await?;
        let favourites = favourites
            .into_iter()
            .filter_map(|(partner_id, added_at)| {
                partners.remove(&partner_id).map(|partner| (partner, added_at))
            })
            .collect();

        let mut filter = FilterDocument::new();
        filter.equals(OrderField::ClientId, Some(FilterValue::Int(id as i64)));
        let orders = OrderRepository::new(self.db)
            .recent(&filter, DETAIL_RECENT_ORDERS)
            .await?;

        Ok(Some(ClientDetail {
            client,
            favourites,
            orders,
        }))
    }

    /// Creates a client account from a public sign-up.
    ///
    /// # Returns
    /// - `Ok(Client)` - The created client
    /// - `Err(AppError::Conflict)` - Email or username already registered
    pub async fn create(&self, params: CreateClientParams) -> Result<Client, AppError> {
        let client_repo = ClientRepository::new(self.db);
        if client_repo
            .is_taken(Some(&params.email), Some(&params.username), None)
            .await?
        {
            return Err(AppError::Conflict(
                "Client with this email or username already exists".to_string(),
            ));
        }

        let password_hash = match &params.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };
        let client = client_repo.create(&params, password_hash).await?;

        tracing::info!("Created client {} ({})", client.id, client.client_code);

        Ok(client)
    }

    /// Applies a partial profile update and logs it in the activity log.
    ///
    /// # Returns
    /// - `Ok(Some(Client))` - The updated client
    /// - `Ok(None)` - No client with that id
    /// - `Err(AppError::Conflict)` - New email or username belongs to another client
    pub async fn update(
        &self,
        id: i32,
        params: UpdateClientParams,
    ) -> Result<Option<Client>, AppError> {
        let client_repo = ClientRepository::new(self.db);
        if client_repo
            .is_taken(params.email.as_deref(), params.username.as_deref(), Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                "Client with this email or username already exists".to_string(),
            ));
        }

        let entry = activity(ActivityKind::ProfileUpdated, "Profile updated", None);
        client_repo.update(id, params, Some(entry)).await
    }

    /// Hard deletes a client. Orders are never deleted, so a client with orders is kept.
    ///
    /// # Returns
    /// - `Ok(true)` - Client deleted
    /// - `Ok(false)` - No client with that id
    /// - `Err(AppError::Conflict)` - The client has placed orders
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut placed = FilterDocument::new();
        placed.equals(OrderField::ClientId, Some(FilterValue::Int(id as i64)));
        let order_count = OrderRepository::new(self.db).count(&placed).await?;
        if order_count > 0 {
            return Err(AppError::Conflict(format!(
                "Client has {} orders and cannot be deleted; deactivate the account instead",
                order_count
            )));
        }

        let deleted = ClientRepository::new(self.db).delete(id).await?;
        if deleted {
            tracing::info!("Deleted client {}", id);
        }
        Ok(deleted)
    }

    /// Orders placed by one client, optionally narrowed by status and event date.
    ///
    /// # Returns
    /// - `Ok(Some(Page<Order>))` - Requested page of the client's orders
    /// - `Ok(None)` - No client with that id
    pub async fn orders(
        &self,
        id: i32,
        filters: &ClientOrderFilterParams,
        query: &ListQuery<OrderSort>,
    ) -> Result<Option<Page<Order>>, AppError> {
        if ClientRepository::new(self.db).find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let filter = build_client_order_filter(id, filters);
        OrderRepository::new(self.db)
            .get_paginated(&filter, query)
            .await
            .map(Some)
    }

    /// Adds a partner to the client's favourites.
    ///
    /// Adding an existing favourite is a no-op and does not log a second activity.
    ///
    /// # Returns
    /// - `Ok(Some(ClientDetail))` - Updated client detail
    /// - `Ok(None)` - No client with that id
    /// - `Err(AppError::NotFound)` - No partner with that id
    pub async fn add_favourite(
        &self,
        id: i32,
        partner_id: i32,
    ) -> Result<Option<ClientDetail>, AppError> {
        let client_repo = ClientRepository::new(self.db);
        if client_repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        let Some(partner) = PartnerRepository::new(self.db).find_by_id(partner_id).await? else {
            return Err(AppError::NotFound("Partner not found".to_string()));
        };

        if client_repo.add_favourite(id, partner_id).await? {
            client_repo
                .append_activity(
                    id,
                    activity(
                        ActivityKind::PartnerFavorited,
                        format!("Added {} to favourites", partner.company_name),
                        Some(partner_id),
                    ),
                )
                .await?;
        }

        self.get_detail(id).await
    }

    /// Removes a partner from the client's favourites.
    ///
    /// # Returns
    /// - `Ok(Some(ClientDetail))` - Updated client detail
    /// - `Ok(None)` - No client with that id
    /// - `Err(AppError::NotFound)` - The partner was not a favourite
    pub async fn remove_favourite(
        &self,
        id: i32,
        partner_id: i32,
    ) -> Result<Option<ClientDetail>, AppError> {
        let client_repo = ClientRepository::new(self.db);
        if client_repo.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        if !client_repo.remove_favourite(id, partner_id).await? {
            return Err(AppError::NotFound("Favourite partner not found".to_string()));
        }

        self.get_detail(id).await
    }
}
