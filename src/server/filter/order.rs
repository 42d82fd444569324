use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    model::enums::{CurrentStage, OrderStatus, PaymentStatus},
    server::{
        filter::{Clause, FilterDocument, FilterField, FilterValue},
        util::{query::QueryParams, validate::Validator},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    ClientId,
    PartnerId,
    Status,
    OrderName,
    OrderCode,
    City,
    Venue,
    EventName,
    EventType,
    TotalAmount,
    PaymentStatus,
    EventDateTime,
    BookingDateTime,
    Progress,
    CurrentStage,
    CreatedAt,
}

impl FilterField for OrderField {
    fn path(&self) -> &'static str {
        match self {
            OrderField::ClientId => "clientId",
            OrderField::PartnerId => "partnerId",
            OrderField::Status => "status",
            OrderField::OrderName => "orderName",
            OrderField::OrderCode => "orderId",
            OrderField::City => "location.address.city",
            OrderField::Venue => "location.venue",
            OrderField::EventName => "eventDetails.eventName",
            OrderField::EventType => "eventDetails.eventType",
            OrderField::TotalAmount => "pricing.totalAmount",
            OrderField::PaymentStatus => "paymentStatus",
            OrderField::EventDateTime => "eventDateTime",
            OrderField::BookingDateTime => "bookingDateTime",
            OrderField::Progress => "progress.percentage",
            OrderField::CurrentStage => "progress.currentStage",
            OrderField::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stage: Option<CurrentStage>,
}

impl OrderFilterParams {
    pub fn from_query(params: &QueryParams, v: &mut Validator) -> Self {
        Self {
            client_id: v.int("clientId", params.get("clientId"), 1, i32::MAX as i64),
            partner_id: v.int("partnerId", params.get("partnerId"), 1, i32::MAX as i64),
            status: v.all_of("status", &params.get_all("status")),
            order_name: params.get("orderName").map(str::to_string),
            location: params.get("location").map(str::to_string),
            event_type: params.get("eventType").map(str::to_string),
            min_amount: v.float("minAmount", params.get("minAmount"), 0.0),
            max_amount: v.float("maxAmount", params.get("maxAmount"), 0.0),
            payment_status: v.one_of("paymentStatus", params.get("paymentStatus")),
            event_date_from: v.date("eventDateFrom", params.get("eventDateFrom")),
            event_date_to: v.date("eventDateTo", params.get("eventDateTo")),
            booking_date_from: v.date("bookingDateFrom", params.get("bookingDateFrom")),
            booking_date_to: v.date("bookingDateTo", params.get("bookingDateTo")),
            progress_min: v.int("progressMin", params.get("progressMin"), 0, 100),
            progress_max: v.int("progressMax", params.get("progressMax"), 0, 100),
            current_stage: v.one_of("currentStage", params.get("currentStage")),
        }
    }
}

fn statuses(status: &[OrderStatus]) -> Vec<FilterValue> {
    status.iter().map(|s| FilterValue::text(s.as_str())).collect()
}

pub fn build_order_filter(
    params: &OrderFilterParams,
    search: Option<&str>,
) -> FilterDocument<OrderField> {
    let mut doc = FilterDocument::new();

    doc.equals(OrderField::ClientId, params.client_id.map(FilterValue::Int))
        .equals(OrderField::PartnerId, params.partner_id.map(FilterValue::Int))
        .one_or_many(OrderField::Status, statuses(&params.status))
        .contains(OrderField::OrderName, params.order_name.as_deref())
        .contains(OrderField::City, params.location.as_deref())
        .equals(
            OrderField::EventType,
            params.event_type.as_deref().map(FilterValue::text),
        )
        .gte(OrderField::TotalAmount, params.min_amount.map(FilterValue::Float))
        .lte(OrderField::TotalAmount, params.max_amount.map(FilterValue::Float))
        .equals(
            OrderField::PaymentStatus,
            params.payment_status.map(|p| FilterValue::text(p.as_str())),
        )
        .gte(
            OrderField::EventDateTime,
            params.event_date_from.map(FilterValue::Date),
        )
        .lte(
            OrderField::EventDateTime,
            params.event_date_to.map(FilterValue::Date),
        )
        .gte(
            OrderField::BookingDateTime,
            params.booking_date_from.map(FilterValue::Date),
        )
        .lte(
            OrderField::BookingDateTime,
            params.booking_date_to.map(FilterValue::Date),
        )
        .gte(OrderField::Progress, params.progress_min.map(FilterValue::Int))
        .lte(OrderField::Progress, params.progress_max.map(FilterValue::Int))
        .equals(
            OrderField::CurrentStage,
            params.current_stage.map(|s| FilterValue::text(s.as_str())),
        );

    if let Some(term) = search {
        doc.any_of(order_search_clauses(term));
    }

    doc
}

pub fn order_search_clauses(term: &str) -> Vec<Clause<OrderField>> {
    [
        OrderField::OrderName,
        OrderField::OrderCode,
        OrderField::EventName,
        OrderField::Venue,
        OrderField::City,
    ]
    .into_iter()
    .map(|field| Clause::Contains {
        field,
        term: term.to_string(),
    })
    .collect()
}

/// Orders of one client, optionally narrowed by status and event date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOrderFilterParams {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl ClientOrderFilterParams {
    pub fn from_query(params: &QueryParams, v: &mut Validator) -> Self {
        Self {
            status: v.all_of("status", &params.get_all("status")),
            date_from: v.date("dateFrom", params.get("dateFrom")),
            date_to: v.date("dateTo", params.get("dateTo")),
        }
    }
}

pub fn build_client_order_filter(
    client_id: i32,
    params: &ClientOrderFilterParams,
) -> FilterDocument<OrderField> {
    let mut doc = FilterDocument::new();

    doc.equals(OrderField::ClientId, Some(FilterValue::Int(client_id as i64)))
        .one_or_many(OrderField::Status, statuses(&params.status))
        .gte(OrderField::EventDateTime, params.date_from.map(FilterValue::Date))
        .lte(OrderField::EventDateTime, params.date_to.map(FilterValue::Date));

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(query: &str) -> OrderFilterParams {
        let mut v = Validator::new();
        let params = OrderFilterParams::from_query(&QueryParams::parse(query), &mut v);
        assert!(v.is_valid());
        params
    }

    #[test]
    fn single_and_multiple_statuses() {
        assert_eq!(
            build_order_filter(&parse("status=confirmed"), None).to_json(),
            json!({ "status": "confirmed" })
        );
        assert_eq!(
            build_order_filter(&parse("status=confirmed&status=in_progress"), None).to_json(),
            json!({ "status": { "$in": ["confirmed", "in_progress"] } })
        );
    }

    #[test]
    fn amount_and_progress_ranges() {
        let params = parse("minAmount=100&maxAmount=500&progressMin=10&progressMax=90");
        assert_eq!(
            build_order_filter(&params, None).to_json(),
            json!({
                "pricing.totalAmount": { "$gte": 100.0, "$lte": 500.0 },
                "progress.percentage": { "$gte": 10, "$lte": 90 }
            })
        );
    }

    #[test]
    fn rejects_out_of_range_progress() {
        let mut v = Validator::new();
        OrderFilterParams::from_query(&QueryParams::parse("progressMax=150"), &mut v);
        assert!(!v.is_valid());
    }

    #[test]
    fn client_order_filter_pins_client() {
        let doc = build_client_order_filter(7, &ClientOrderFilterParams::default());
        assert_eq!(doc.to_json(), json!({ "clientId": 7 }));
    }
}
