//! Order service for business logic.
//!
//! Order placement, descriptive edits, lifecycle transitions and order analytics. Status
//! changes go through `OrderState::transition`; completing or refunding an order also
//! updates the partner's revenue ledger and the client's activity log.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        enums::{
            ActivityKind, CurrentStage, GroupBy, OrderSort, OrderStatus, PaymentStatus,
            TransactionKind,
        },
        order::{OrderPeriodStatsDto, OrderSummaryDto},
        partner::TransactionDto,
    },
    server::{
        data::{client::ClientRepository, order::OrderRepository, partner::PartnerRepository},
        error::AppError,
        filter::{
            order::{build_order_filter, OrderField, OrderFilterParams},
            FilterDocument, FilterValue,
        },
        model::{
            analytics::{order_period_stats, summarize_orders},
            client::activity,
            listing::{ListQuery, Page},
            order::{CreateOrderParams, Order, OrderState, UpdateOrderParams},
        },
    },
};

pub struct OrderService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> OrderService<'a> {
    /// Creates a new OrderService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `OrderService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists orders matching the filters together with a summary over every match.
    ///
    /// # Returns
    /// - `Ok((Page<Order>, OrderSummaryDto))` - Requested page and the full-set summary
    /// - `Err(AppError::DbErr)` - Database error during either query
    pub async fn list(
        &self,
        filters: &OrderFilterParams,
        query: &ListQuery<OrderSort>,
    ) -> Result<(Page<Order>, OrderSummaryDto), AppError> {
        let filter = build_order_filter(filters, query.search.as_deref());
        tracing::debug!("Order filter: {}", filter.to_json());

        let order_repo = OrderRepository::new(self.db);
        let page = order_repo.get_paginated(&filter, query).await?;
        let summary = summarize_orders(&order_repo.figures(&filter).await?);

        Ok((page, summary))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Order>, AppError> {
        OrderRepository::new(self.db).find_by_id(id).await
    }

    /// Places a pending order and logs it on the client's activity.
    ///
    /// # Returns
    /// - `Ok(Order)` - The created order
    /// - `Err(AppError::NotFound)` - Client or partner does not exist
    pub async fn create(&self, params: CreateOrderParams) -> Result<Order, AppError> {
        let client_repo = ClientRepository::new(self.db);
        if client_repo.find_by_id(params.client_id).await?.is_none() {
            return Err(AppError::NotFound("Client not found".to_string()));
        }
        if PartnerRepository::new(self.db)
            .find_by_id(params.partner_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Partner not found".to_string()));
        }

        let order = OrderRepository::new(self.db).create(&params).await?;

        client_repo
            .append_activity(
                order.client_id,
                activity(
                    ActivityKind::OrderPlaced,
                    format!("Placed order {}", order.order_name),
                    Some(order.id),
                ),
            )
            .await?;

        tracing::info!(
            "Client {} placed order {} with partner {} for {}",
            order.client_id,
            order.order_code,
            order.partner_id,
            order.pricing.total_amount
        );

        Ok(order)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateOrderParams,
    ) -> Result<Option<Order>, AppError> {
        OrderRepository::new(self.db).update(id, params).await
    }

    /// Moves an order through its lifecycle.
    ///
    /// Completing an order credits the partner and logs the completion for the client.
    /// Refunding marks the payment refunded, and debits the partner when the order had
    /// been completed.
    ///
    /// # Returns
    /// - `Ok(Some(Order))` - The order in its new state
    /// - `Ok(None)` - No order with that id
    /// - `Err(AppError::Conflict)` - Transition not allowed from the current state
    /// - `Err(AppError::BadRequest)` - Stage is not a delivery milestone
    pub async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
        stage: Option<CurrentStage>,
    ) -> Result<Option<Order>, AppError> {
        let order_repo = OrderRepository::new(self.db);
        let Some(order) = order_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let previous = order.state;
        let next = previous.transition(status, stage)?;
        let payment_status = (next == OrderState::Refunded).then_some(PaymentStatus::Refunded);
        let updated = order_repo.set_state(id, next, payment_status).await?;

        let amount = updated.pricing.total_amount;
        match (previous, next) {
            (_, OrderState::Completed) => {
                PartnerRepository::new(self.db)
                    .record_transaction(
                        updated.partner_id,
                        TransactionDto {
                            kind: TransactionKind::PaymentReceived,
                            amount,
                            description: format!("Payment for order {}", updated.order_code),
                            order_id: Some(updated.id),
                            date: Utc::now(),
                        },
                        amount,
                    )
                    .await?;
                ClientRepository::new(self.db)
                    .append_activity(
                        updated.client_id,
                        activity(
                            ActivityKind::OrderCompleted,
                            format!("Order {} completed", updated.order_name),
                            Some(updated.id),
                        ),
                    )
                    .await?;
            }
            (OrderState::Completed, OrderState::Refunded) => {
                PartnerRepository::new(self.db)
                    .record_transaction(
                        updated.partner_id,
                        TransactionDto {
                            kind: TransactionKind::Refund,
                            amount: -amount,
                            description: format!("Refund for order {}", updated.order_code),
                            order_id: Some(updated.id),
                            date: Utc::now(),
                        },
                        -amount,
                    )
                    .await?;
            }
            _ => {}
        }

        tracing::info!(
            "Order {} moved from {} to {}",
            updated.order_code,
            previous.status(),
            next.status()
        );

        Ok(Some(updated))
    }

    /// Orders created in the date range, grouped by period and status.
    pub async fn analytics(
        &self,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
        group_by: GroupBy,
    ) -> Result<Vec<OrderPeriodStatsDto>, AppError> {
        let mut filter: FilterDocument<OrderField> = FilterDocument::new();
        filter
            .gte(OrderField::CreatedAt, date_from.map(FilterValue::Date))
            .lte(OrderField::CreatedAt, date_to.map(FilterValue::Date));

        let figures = OrderRepository::new(self.db).figures(&filter).await?;

        Ok(order_period_stats(&figures, group_by))
    }
}
