//! Client data repository for database operations.
//!
//! Handles client accounts, their favourite partners and the activity log. Entity models
//! are converted to `Client` domain models at this boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::{
        client::ActivityDto,
        enums::{ClientSort, SortOrder},
    },
    server::{
        data::condition::to_condition,
        error::AppError,
        filter::{client::ClientField, FilterDocument},
        model::{
            client::{Client, CreateClientParams, UpdateClientParams},
            listing::{ListQuery, Page},
        },
        util::code::generate_code,
    },
};

/// Repository providing database operations for clients.
pub struct ClientRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClientRepository<'a> {
    /// Creates a new ClientRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ClientRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new client with a freshly generated `CLI_` code.
    ///
    /// # Arguments
    /// - `params` - Validated sign-up fields
    /// - `password_hash` - bcrypt hash, `None` for identity-only accounts
    ///
    /// # Returns
    /// - `Ok(Client)` - The created client
    /// - `Err(AppError::DbErr)` - Insert failed, including unique violations
    pub async fn create(
        &self,
        params: &CreateClientParams,
        password_hash: Option<String>,
    ) -> Result<Client, AppError> {
        let now = Utc::now();
        let entity = entity::client::ActiveModel {
            client_code: ActiveValue::Set(generate_code("CLI")),
            identity_uid: ActiveValue::Set(params.identity_uid.clone()),
            username: ActiveValue::Set(params.username.clone()),
            email: ActiveValue::Set(params.email.clone()),
            password_hash: ActiveValue::Set(password_hash),
            phone_no: ActiveValue::Set(params.phone_no.clone()),
            profile_pic_url: ActiveValue::Set(None),
            street: ActiveValue::Set(params.address.street.clone()),
            city: ActiveValue::Set(params.address.city.clone()),
            state: ActiveValue::Set(params.address.state.clone()),
            country: ActiveValue::Set(params.address.country.clone()),
            zip_code: ActiveValue::Set(params.address.zip_code.clone()),
            plan_type: ActiveValue::Set(params.plan_type.to_string()),
            plan_start: ActiveValue::Set(Some(now)),
            plan_end: ActiveValue::Set(None),
            activities: ActiveValue::Set(serde_json::json!([])),
            is_active: ActiveValue::Set(true),
            is_verified: ActiveValue::Set(false),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Client::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Client>, AppError> {
        entity::prelude::Client::find_by_id(id)
            .one(self.db)
            .await?
            .map(Client::from_entity)
            .transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        entity::prelude::Client::find()
            .filter(entity::client::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?
            .map(Client::from_entity)
            .transpose()
    }

    pub async fn find_by_identity_uid(&self, uid: &str) -> Result<Option<Client>, AppError> {
        entity::prelude::Client::find()
            .filter(entity::client::Column::IdentityUid.eq(uid))
            .one(self.db)
            .await?
            .map(Client::from_entity)
            .transpose()
    }

    /// Checks whether another client already uses the email or username.
    ///
    /// # Arguments
    /// - `email` - Email to look for (compared lowercase)
    /// - `username` - Username to look for
    /// - `except_id` - Client to ignore, used when updating an existing account
    pub async fn is_taken(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        except_id: Option<i32>,
    ) -> Result<bool, AppError> {
        if email.is_none() && username.is_none() {
            return Ok(false);
        }

        let count = entity::prelude::Client::find()
            .filter(
                Condition::any()
                    .add_option(email.map(|e| entity::client::Column::Email.eq(e.to_lowercase())))
                    .add_option(username.map(|u| entity::client::Column::Username.eq(u))),
            )
            .filter(
                Condition::all()
                    .add_option(except_id.map(|id| entity::client::Column::Id.ne(id))),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets one page of clients matching the filter document.
    ///
    /// Ties in the sort column break on ascending id so pages never overlap.
    ///
    /// # Returns
    /// - `Ok(Page<Client>)` - Requested page and the total number of matches
    /// - `Err(AppError)` - Query failed or a row could not be converted
    pub async fn get_paginated(
        &self,
        filter: &FilterDocument<ClientField>,
        query: &ListQuery<ClientSort>,
    ) -> Result<Page<Client>, AppError> {
        let column = match query.sort_by.unwrap_or(ClientSort::CreatedAt) {
            ClientSort::CreatedAt => entity::client::Column::CreatedAt,
            ClientSort::Username => entity::client::Column::Username,
            ClientSort::Email => entity::client::Column::Email,
            ClientSort::LastLogin => entity::client::Column::LastLogin,
        };

        let paginator = entity::prelude::Client::find()
            .filter(to_condition(filter))
            .order_by(column, sort_order(query.sort_order))
            .order_by_asc(entity::client::Column::Id)
            .paginate(self.db, query.limit);

        let total = paginator.num_items().await?;
        let entities = if query.is_past_end(total) {
            Vec::new()
        } else {
            paginator.fetch_page(query.page.saturating_sub(1)).await?
        };
        let items = entities
            .into_iter()
            .map(Client::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    pub async fn count(&self, filter: &FilterDocument<ClientField>) -> Result<u64, AppError> {
        Ok(entity::prelude::Client::find()
            .filter(to_condition(filter))
            .count(self.db)
            .await?)
    }

    /// Creation timestamps of clients created at or after `since`.
    pub async fn created_since(&self, since: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError> {
        Ok(entity::prelude::Client::find()
            .select_only()
            .column(entity::client::Column::CreatedAt)
            .filter(entity::client::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?)
    }

    /// Counts clients with a login at or after `since`.
    pub async fn count_logged_in_since(&self, since: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(entity::prelude::Client::find()
            .filter(entity::client::Column::LastLogin.gte(since))
            .count(self.db)
            .await?)
    }

    /// Applies a partial update, appending `activity` to the log when given.
    ///
    /// # Returns
    /// - `Ok(Some(Client))` - The updated client
    /// - `Ok(None)` - No client with that id
    /// - `Err(AppError)` - Update failed, including unique violations
    pub async fn update(
        &self,
        id: i32,
        params: UpdateClientParams,
        activity: Option<ActivityDto>,
    ) -> Result<Option<Client>, AppError> {
        let Some(existing) = entity::prelude::Client::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let activities = match activity {
            Some(entry) => Some(appended(&existing.activities, entry)?),
            None => None,
        };

        let mut model: entity::client::ActiveModel = existing.into();
        if let Some(username) = params.username {
            model.username = ActiveValue::Set(username);
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
        if let Some(address) = params.address {
            model.street = ActiveValue::Set(address.street);
            model.city = ActiveValue::Set(address.city);
            model.state = ActiveValue::Set(address.state);
            model.country = ActiveValue::Set(address.country);
            model.zip_code = ActiveValue::Set(address.zip_code);
        }
        if let Some(plan_type) = params.plan_type {
            model.plan_type = ActiveValue::Set(plan_type.to_string());
            model.plan_start = ActiveValue::Set(Some(Utc::now()));
        }
        if let Some(is_active) = params.is_active {
            model.is_active = ActiveValue::Set(is_active);
        }
        if let Some(activities) = activities {
            model.activities = ActiveValue::Set(activities);
        }
        model.updated_at = ActiveValue::Set(Utc::now());

        let entity = model.update(self.db).await?;
        Client::from_entity(entity).map(Some)
    }

    /// Appends an entry to the client's activity log.
    ///
    /// Missing clients are ignored.
    pub async fn append_activity(&self, id: i32, activity: ActivityDto) -> Result<(), AppError> {
        let Some(existing) = entity::prelude::Client::find_by_id(id).one(self.db).await? else {
            return Ok(());
        };

        let activities = appended(&existing.activities, activity)?;
        let mut model: entity::client::ActiveModel = existing.into();
        model.activities = ActiveValue::Set(activities);
        model.update(self.db).await?;
        Ok(())
    }

    pub async fn set_last_login(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::Client::update_many()
            .filter(entity::client::Column::Id.eq(id))
            .col_expr(
                entity::client::Column::LastLogin,
                sea_orm::sea_query::Expr::value(Some(Utc::now())),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Stores the external identity uid on the account.
    pub async fn link_identity(&self, id: i32, uid: &str) -> Result<(), AppError> {
        entity::prelude::Client::update_many()
            .filter(entity::client::Column::Id.eq(id))
            .col_expr(
                entity::client::Column::IdentityUid,
                sea_orm::sea_query::Expr::value(Some(uid.to_string())),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a client. Orders and favourites cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - The client existed and was deleted
    /// - `Ok(false)` - No client with that id
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Client::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Adds a favourite partner.
    ///
    /// # Returns
    /// - `Ok(true)` - Favourite added
    /// - `Ok(false)` - The partner was already a favourite
    pub async fn add_favourite(&self, client_id: i32, partner_id: i32) -> Result<bool, AppError> {
        let existing = entity::prelude::ClientFavouritePartner::find()
            .filter(entity::client_favourite_partner::Column::ClientId.eq(client_id))
            .filter(entity::client_favourite_partner::Column::PartnerId.eq(partner_id))
            .count(self.db)
            .await?;
        if existing > 0 {
            return Ok(false);
        }

        entity::client_favourite_partner::ActiveModel {
            client_id: ActiveValue::Set(client_id),
            partner_id: ActiveValue::Set(partner_id),
            added_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(true)
    }

    /// Removes a favourite partner, returning whether one was removed.
    pub async fn remove_favourite(&self, client_id: i32, partner_id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::ClientFavouritePartner::delete_many()
            .filter(entity::client_favourite_partner::Column::ClientId.eq(client_id))
            .filter(entity::client_favourite_partner::Column::PartnerId.eq(partner_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Favourite partner ids with the time each was added, oldest first.
    pub async fn favourites(&self, client_id: i32) -> Result<Vec<(i32, DateTime<Utc>)>, AppError> {
        Ok(entity::prelude::ClientFavouritePartner::find()
            .select_only()
            .column(entity::client_favourite_partner::Column::PartnerId)
            .column(entity::client_favourite_partner::Column::AddedAt)
            .filter(entity::client_favourite_partner::Column::ClientId.eq(client_id))
            .order_by_asc(entity::client_favourite_partner::Column::AddedAt)
            .into_tuple()
            .all(self.db)
            .await?)
    }
}

pub(crate) fn sort_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// Returns a JSON array column with `entry` pushed onto the end.
pub(crate) fn appended<T: serde::Serialize>(
    column: &serde_json::Value,
    entry: T,
) -> Result<serde_json::Value, AppError> {
    let mut items = match column {
        serde_json::Value::Array(items) => items.clone(),
        _ => Vec::new(),
    };
    items.push(
        serde_json::to_value(entry)
            .map_err(|e| AppError::InternalError(format!("Failed to encode log entry: {}", e)))?,
    );
    Ok(serde_json::Value::Array(items))
}
