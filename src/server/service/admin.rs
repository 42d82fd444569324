//! Admin reporting service.
//!
//! Dashboard overview, time-series analytics and system health. Counts are answered by the
//! database; revenue and per-day series are reduced in memory from narrow projections.

use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        admin::{
            ActiveUsersDto, AnalyticsDto, DashboardDto, DatabaseHealthDto, HealthSummaryDto,
            OverviewDto, SystemHealthDto,
        },
        enums::{AnalyticsMetric, AnalyticsPeriod, OrderStatus, PlanType},
    },
    server::{
        data::{client::ClientRepository, order::OrderRepository, partner::PartnerRepository},
        error::AppError,
        filter::{
            client::ClientField, order::OrderField, partner::PartnerField, FilterDocument,
            FilterField, FilterValue,
        },
        model::analytics::{daily_counts, daily_revenue, daily_signups, revenue_totals},
    },
};

const DASHBOARD_RECENT_ORDERS: u64 = 10;
const DASHBOARD_TOP_PARTNERS: u64 = 5;

fn created_between<F: FilterField>(
    field: F,
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
) -> FilterDocument<F> {
    let mut filter = FilterDocument::new();
    filter
        .gte(field, date_from.map(FilterValue::Date))
        .lte(field, date_to.map(FilterValue::Date));
    filter
}

fn premium_plans() -> Vec<FilterValue> {
    PlanType::ALL
        .iter()
        .filter(|plan| plan.is_premium())
        .map(|plan| FilterValue::text(plan.as_str()))
        .collect()
}

pub struct AdminService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    /// Creates a new AdminService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `AdminService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the admin dashboard.
    ///
    /// The optional date range narrows every count and the revenue totals by creation time.
    /// Top partners are always taken from all verified, active partners.
    pub async fn dashboard(
        &self,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<DashboardDto, AppError> {
        let client_repo = ClientRepository::new(self.db);
        let partner_repo = PartnerRepository::new(self.db);
        let order_repo = OrderRepository::new(self.db);

        let clients = created_between(ClientField::CreatedAt, date_from, date_to);
        let partners = created_between(PartnerField::CreatedAt, date_from, date_to);
        let orders = created_between(OrderField::CreatedAt, date_from, date_to);

        let mut active_clients = clients.clone();
        active_clients.equals(ClientField::IsActive, Some(FilterValue::Bool(true)));
        let mut premium_clients = clients.clone();
        premium_clients.is_in(ClientField::PlanType, premium_plans());

        let mut active_partners = partners.clone();
        active_partners.equals(PartnerField::IsActive, Some(FilterValue::Bool(true)));
        let mut premium_partners = partners.clone();
        premium_partners.is_in(PartnerField::PlanType, premium_plans());
        let mut verified_partners = partners;
        verified_partners.equals(PartnerField::Verified, Some(FilterValue::Bool(true)));

        let mut active_orders = orders.clone();
        active_orders.is_in(
            OrderField::Status,
            vec![
                FilterValue::text(OrderStatus::Confirmed.as_str()),
                FilterValue::text(OrderStatus::InProgress.as_str()),
            ],
        );
        let mut completed_orders = orders.clone();
        completed_orders.equals(
            OrderField::Status,
            Some(FilterValue::text(OrderStatus::Completed.as_str())),
        );

        let overview = OverviewDto {
            total_clients: client_repo.count(&active_clients).await?,
            total_partners: partner_repo.count(&active_partners).await?,
            total_orders: order_repo.count(&orders).await?,
            active_orders: order_repo.count(&active_orders).await?,
            completed_orders: order_repo.count(&completed_orders).await?,
            premium_clients: client_repo.count(&premium_clients).await?,
            premium_partners: partner_repo.count(&premium_partners).await?,
            verified_partners: partner_repo.count(&verified_partners).await?,
        };

        let revenue = revenue_totals(&order_repo.figures(&orders).await?);
        let recent_orders = order_repo
            .recent(&orders, DASHBOARD_RECENT_ORDERS)
            .await?
            .into_iter()
            .map(|o| o.into_dto())
            .collect();
        let top_partners = partner_repo
            .top_rated(DASHBOARD_TOP_PARTNERS)
            .await?
            .into_iter()
            .map(|p| p.into_summary())
            .collect();

        let (database, _) = self.ping().await;

        Ok(DashboardDto {
            overview,
            revenue,
            recent_orders,
            top_partners,
            system_health: HealthSummaryDto {
                status: if database == "connected" { "healthy" } else { "degraded" }.to_string(),
                database,
            },
            last_updated: Utc::now(),
        })
    }

    /// Per-day series for `metric` over the last `period`.
    pub async fn analytics(
        &self,
        period: AnalyticsPeriod,
        metric: AnalyticsMetric,
    ) -> Result<AnalyticsDto, AppError> {
        let start_date = Utc::now() - Duration::days(period.days());

        let data = match metric {
            AnalyticsMetric::Revenue => {
                let orders = created_between(OrderField::CreatedAt, Some(start_date), None);
                daily_revenue(&OrderRepository::new(self.db).figures(&orders).await?)
            }
            AnalyticsMetric::Users => {
                let clients = ClientRepository::new(self.db).created_since(start_date).await?;
                let partners = PartnerRepository::new(self.db).created_since(start_date).await?;
                daily_signups(&clients, &partners)
            }
            AnalyticsMetric::Orders | AnalyticsMetric::Engagement => {
                let orders = created_between(OrderField::CreatedAt, Some(start_date), None);
                let created: Vec<DateTime<Utc>> = OrderRepository::new(self.db)
                    .figures(&orders)
                    .await?
                    .into_iter()
                    .map(|o| o.created_at)
                    .collect();
                daily_counts(&created)
            }
        };

        Ok(AnalyticsDto {
            period,
            metric,
            start_date,
            data,
        })
    }

    /// Database reachability, process uptime and accounts active in the last 24 hours.
    pub async fn system_health(&self, started_at: DateTime<Utc>) -> Result<SystemHealthDto, AppError> {
        let (status, response_time_ms) = self.ping().await;
        let since = Utc::now() - Duration::hours(24);

        Ok(SystemHealthDto {
            database: DatabaseHealthDto {
                status,
                response_time_ms,
            },
            uptime_seconds: (Utc::now() - started_at).num_seconds(),
            active_users: ActiveUsersDto {
                clients: ClientRepository::new(self.db)
                    .count_logged_in_since(since)
                    .await?,
                partners: PartnerRepository::new(self.db)
                    .count_logged_in_since(since)
                    .await?,
            },
            timestamp: Utc::now(),
        })
    }

    async fn ping(&self) -> (String, u64) {
        let started = Instant::now();
        let status = match self.db.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                "disconnected"
            }
        };
        (status.to_string(), started.elapsed().as_millis() as u64)
    }
}
