use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    enums::{AdminRole, AnalyticsMetric, AnalyticsPeriod, PermissionAction, PermissionModule},
    order::OrderDto,
    partner::PartnerSummaryDto,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PermissionDto {
    pub module: PermissionModule,
    pub actions: Vec<PermissionAction>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: i32,
    pub admin_id: String,
    pub username: String,
    pub email: String,
    pub phone_no: Option<String>,
    pub role: AdminRole,
    pub permissions: Vec<PermissionDto>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub total_clients: u64,
    pub total_partners: u64,
    pub total_orders: u64,
    pub active_orders: u64,
    pub completed_orders: u64,
    pub premium_clients: u64,
    pub premium_partners: u64,
    pub verified_partners: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDto {
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub total_orders: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct HealthSummaryDto {
    pub database: String,
    pub status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub overview: OverviewDto,
    pub revenue: RevenueDto,
    pub recent_orders: Vec<OrderDto>,
    pub top_partners: Vec<PartnerSummaryDto>,
    pub system_health: HealthSummaryDto,
    pub last_updated: DateTime<Utc>,
}

/// One bucket of a time series. Which value fields are present depends on the metric.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPointDto {
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_signups: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_signups: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub period: AnalyticsPeriod,
    pub metric: AnalyticsMetric,
    pub start_date: DateTime<Utc>,
    pub data: Vec<AnalyticsPointDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealthDto {
    pub status: String,
    pub response_time_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ActiveUsersDto {
    pub clients: u64,
    pub partners: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealthDto {
    pub database: DatabaseHealthDto,
    pub uptime_seconds: i64,
    /// Accounts with a login during the last 24 hours.
    pub active_users: ActiveUsersDto,
    pub timestamp: DateTime<Utc>,
}
