//! Order data repository for database operations.
//!
//! Lifecycle columns (`status`, `current_stage`, `progress_percentage`) are only ever written
//! together from an `OrderState`.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::enums::{OrderSort, OrderStatus, PaymentStatus},
    server::{
        data::{client::sort_order, condition::to_condition},
        error::AppError,
        filter::{order::OrderField, FilterDocument},
        model::{
            analytics::OrderFigure,
            listing::{ListQuery, Page},
            order::{CreateOrderParams, Order, OrderState, UpdateOrderParams},
            parse_stored,
        },
        util::code::generate_code,
    },
};

/// Repository providing database operations for orders.
pub struct OrderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderRepository<'a> {
    /// Creates a new OrderRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `OrderRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending order booked now, with a fresh `ORD_` code.
    ///
    /// # Returns
    /// - `Ok(Order)` - The created order
    /// - `Err(AppError::DbErr)` - Insert failed
    pub async fn create(&self, params: &CreateOrderParams) -> Result<Order, AppError> {
        let now = Utc::now();
        let state = OrderState::Pending;
        let additional_charges = serde_json::to_value(&params.pricing.additional_charges)
            .map_err(|e| AppError::InternalError(format!("Failed to encode charges: {}", e)))?;

        let entity = entity::order::ActiveModel {
            order_code: ActiveValue::Set(generate_code("ORD")),
            order_name: ActiveValue::Set(params.order_name.clone()),
            client_id: ActiveValue::Set(params.client_id),
            partner_id: ActiveValue::Set(params.partner_id),
            event_type: ActiveValue::Set(params.event.event_type.clone()),
            event_name: ActiveValue::Set(params.event.event_name.clone()),
            event_description: ActiveValue::Set(params.event.description.clone()),
            guest_count: ActiveValue::Set(params.event.guest_count),
            event_date_time: ActiveValue::Set(params.event_date_time),
            booking_date_time: ActiveValue::Set(now),
            venue: ActiveValue::Set(params.location.venue.clone()),
            city: ActiveValue::Set(params.location.city.clone()),
            state: ActiveValue::Set(params.location.state.clone()),
            country: ActiveValue::Set(params.location.country.clone()),
            base_price: ActiveValue::Set(params.pricing.base_price),
            additional_charges: ActiveValue::Set(additional_charges),
            discount_amount: ActiveValue::Set(params.pricing.discount_amount),
            discount_reason: ActiveValue::Set(params.pricing.discount_reason.clone()),
            tax_amount: ActiveValue::Set(params.pricing.tax_amount),
            tax_percentage: ActiveValue::Set(params.pricing.tax_percentage),
            total_amount: ActiveValue::Set(params.pricing.total_amount),
            status: ActiveValue::Set(state.status().to_string()),
            current_stage: ActiveValue::Set(state.current_stage().map(|s| s.to_string())),
            progress_percentage: ActiveValue::Set(state.progress()),
            payment_status: ActiveValue::Set(PaymentStatus::Pending.to_string()),
            special_instructions: ActiveValue::Set(params.special_instructions.clone()),
            data_providing_method: ActiveValue::Set(params.data_providing_method.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Order::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Order>, AppError> {
        entity::prelude::Order::find_by_id(id)
            .one(self.db)
            .await?
            .map(Order::from_entity)
            .transpose()
    }

    /// Gets one page of orders matching the filter document.
    ///
    /// # Returns
    /// - `Ok(Page<Order>)` - Requested page and the total match count
    /// - `Err(AppError)` - Query failed or a row could not be converted
    pub async fn get_paginated(
        &self,
        filter: &FilterDocument<OrderField>,
        query: &ListQuery<OrderSort>,
    ) -> Result<Page<Order>, AppError> {
        let column = match query.sort_by.unwrap_or(OrderSort::CreatedAt) {
            OrderSort::CreatedAt => entity::order::Column::CreatedAt,
            OrderSort::EventDateTime => entity::order::Column::EventDateTime,
            OrderSort::BookingDateTime => entity::order::Column::BookingDateTime,
            OrderSort::TotalAmount => entity::order::Column::TotalAmount,
            OrderSort::Progress => entity::order::Column::ProgressPercentage,
        };

        let paginator = entity::prelude::Order::find()
            .filter(to_condition(filter))
            .order_by(column, sort_order(query.sort_order))
            .order_by_asc(entity::order::Column::Id)
            .paginate(self.db, query.limit);

        let total = paginator.num_items().await?;
        let entities = if query.is_past_end(total) {
            Vec::new()
        } else {
            paginator.fetch_page(query.page.saturating_sub(1)).await?
        };
        let items = entities
            .into_iter()
            .map(Order::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    /// Most recently created orders matching the filter.
    pub async fn recent(
        &self,
        filter: &FilterDocument<OrderField>,
        limit: u64,
    ) -> Result<Vec<Order>, AppError> {
        entity::prelude::Order::find()
            .filter(to_condition(filter))
            .order_by_desc(entity::order::Column::CreatedAt)
            .order_by_desc(entity::order::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Order::from_entity)
            .collect()
    }

    /// Status, amount and creation time of every order matching the filter.
    pub async fn figures(
        &self,
        filter: &FilterDocument<OrderField>,
    ) -> Result<Vec<OrderFigure>, AppError> {
        let rows: Vec<(String, f64, DateTime<Utc>)> = entity::prelude::Order::find()
            .select_only()
            .column(entity::order::Column::Status)
            .column(entity::order::Column::TotalAmount)
            .column(entity::order::Column::CreatedAt)
            .filter(to_condition(filter))
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(status, total_amount, created_at)| {
                Ok(OrderFigure {
                    status: parse_stored::<OrderStatus>("status", &status)?,
                    total_amount,
                    created_at,
                })
            })
            .collect()
    }

    pub async fn count(&self, filter: &FilterDocument<OrderField>) -> Result<u64, AppError> {
        Ok(entity::prelude::Order::find()
            .filter(to_condition(filter))
            .count(self.db)
            .await?)
    }

    /// Updates descriptive fields.
    ///
    /// # Returns
    /// - `Ok(Some(Order))` - The updated order
    /// - `Ok(None)` - No order with that id
    pub async fn update(
        &self,
        id: i32,
        params: UpdateOrderParams,
    ) -> Result<Option<Order>, AppError> {
        let Some(existing) = entity::prelude::Order::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut model: entity::order::ActiveModel = existing.into();
        if let Some(order_name) = params.order_name {
            model.order_name = ActiveValue::Set(order_name);
        }
        if let Some(event) = params.event {
            model.event_type = ActiveValue::Set(event.event_type);
            model.event_name = ActiveValue::Set(event.event_name);
            model.event_description = ActiveValue::Set(event.description);
            model.guest_count = ActiveValue::Set(event.guest_count);
        }
        if let Some(event_date_time) = params.event_date_time {
            model.event_date_time = ActiveValue::Set(event_date_time);
        }
        if let Some(location) = params.location {
            model.venue = ActiveValue::Set(location.venue);
            model.city = ActiveValue::Set(location.city);
            model.state = ActiveValue::Set(location.state);
            model.country = ActiveValue::Set(location.country);
        }
        if let Some(special_instructions) = params.special_instructions {
            model.special_instructions = ActiveValue::Set(Some(special_instructions));
        }
        if let Some(method) = params.data_providing_method {
            model.data_providing_method = ActiveValue::Set(method.to_string());
        }
        if let Some(payment_status) = params.payment_status {
            model.payment_status = ActiveValue::Set(payment_status.to_string());
        }
        model.updated_at = ActiveValue::Set(Utc::now());

        let entity = model.update(self.db).await?;
        Order::from_entity(entity).map(Some)
    }

    /// Writes the lifecycle columns from `state`, and the payment status when given.
    ///
    /// # Returns
    /// - `Ok(Order)` - The updated order
    /// - `Err(AppError::DbErr)` - Update failed or the order no longer exists
    pub async fn set_state(
        &self,
        id: i32,
        state: OrderState,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Order, AppError> {
        let entity = entity::order::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(state.status().to_string()),
            current_stage: ActiveValue::Set(state.current_stage().map(|s| s.to_string())),
            progress_percentage: ActiveValue::Set(state.progress()),
            payment_status: match payment_status {
                Some(p) => ActiveValue::Set(p.to_string()),
                None => ActiveValue::NotSet,
            },
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Order::from_entity(entity)
    }
}
