use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::enums::{CurrentStage, DataProvidingMethod, OrderStatus, PaymentStatus};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ChargeDto {
    pub description: String,
    pub amount: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DiscountDto {
    pub amount: f64,
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TaxDto {
    pub amount: f64,
    pub percentage: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingDto {
    pub base_price: f64,
    pub additional_charges: Vec<ChargeDto>,
    pub discount: DiscountDto,
    pub tax: TaxDto,
    pub total_amount: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsDto {
    pub event_type: Option<String>,
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub guest_count: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct OrderLocationDto {
    pub venue: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDto {
    pub current_stage: Option<CurrentStage>,
    pub percentage: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub order_id: String,
    pub order_name: String,
    pub client_id: i32,
    pub partner_id: i32,
    pub event_details: EventDetailsDto,
    pub event_date_time: DateTime<Utc>,
    pub booking_date_time: DateTime<Utc>,
    pub location: OrderLocationDto,
    pub pricing: PricingDto,
    pub status: OrderStatus,
    pub progress: ProgressDto,
    pub payment_status: PaymentStatus,
    pub special_instructions: Option<String>,
    pub data_providing_method: DataProvidingMethod,
    /// Whole days since the booking was made.
    pub order_age_days: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricingDto {
    pub base_price: f64,
    #[serde(default)]
    pub additional_charges: Vec<ChargeDto>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub discount_reason: Option<String>,
    /// Takes precedence over `taxAmount` when both are sent.
    #[serde(default)]
    pub tax_percentage: Option<f64>,
    #[serde(default)]
    pub tax_amount: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDto {
    pub order_name: String,
    /// Defaults to the authenticated client; required when an admin places the order.
    #[serde(default)]
    pub client_id: Option<i32>,
    pub partner_id: i32,
    #[serde(default)]
    pub event_details: Option<EventDetailsDto>,
    pub event_date_time: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<OrderLocationDto>,
    pub pricing: CreatePricingDto,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub data_providing_method: Option<DataProvidingMethod>,
}

/// Descriptive order fields. Status and pricing are not editable here.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDto {
    pub order_name: Option<String>,
    pub event_details: Option<EventDetailsDto>,
    pub event_date_time: Option<DateTime<Utc>>,
    pub location: Option<OrderLocationDto>,
    pub special_instructions: Option<String>,
    pub data_providing_method: Option<DataProvidingMethod>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,
    #[serde(default)]
    pub current_stage: Option<CurrentStage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StatusCountDto {
    pub status: OrderStatus,
    pub count: u64,
}

/// Aggregates attached to the order listing, computed over every matching order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryDto {
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub status_breakdown: Vec<StatusCountDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusStatsDto {
    pub status: OrderStatus,
    pub count: u64,
    pub revenue: f64,
    pub avg_value: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPeriodStatsDto {
    pub period: String,
    pub status_breakdown: Vec<StatusStatsDto>,
    pub total_orders: u64,
    pub total_revenue: f64,
}
