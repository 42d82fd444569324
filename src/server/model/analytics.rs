//! In-memory reductions behind the dashboards and order analytics.
//!
//! Repositories fetch a narrow projection of the matching rows; everything here is pure so
//! the grouping rules can be tested without a database.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::model::{
    admin::{AnalyticsPointDto, RevenueDto},
    enums::{GroupBy, OrderStatus},
    order::{OrderPeriodStatsDto, OrderSummaryDto, StatusCountDto, StatusStatsDto},
};

/// Columns of an order needed for revenue reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFigure {
    pub status: OrderStatus,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Bucket label for a timestamp: `%Y-%m-%d`, `%Y-%U`, `%Y-%m` or `%Y`.
pub fn period_key(at: DateTime<Utc>, group_by: GroupBy) -> String {
    let format = match group_by {
        GroupBy::Day => "%Y-%m-%d",
        GroupBy::Week => "%Y-%U",
        GroupBy::Month => "%Y-%m",
        GroupBy::Year => "%Y",
    };
    at.format(format).to_string()
}

fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average(total: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        round_money(total / count as f64)
    }
}

pub fn revenue_totals(orders: &[OrderFigure]) -> RevenueDto {
    let total: f64 = orders.iter().map(|o| o.total_amount).sum();
    let count = orders.len() as u64;
    RevenueDto {
        total_revenue: round_money(total),
        average_order_value: average(total, count),
        total_orders: count,
    }
}

/// Listing summary over every order matching the filters, not just the current page.
pub fn summarize_orders(orders: &[OrderFigure]) -> OrderSummaryDto {
    let revenue = revenue_totals(orders);
    let status_breakdown = OrderStatus::ALL
        .iter()
        .filter_map(|status| {
            let count = orders.iter().filter(|o| o.status == *status).count() as u64;
            (count > 0).then_some(StatusCountDto {
                status: *status,
                count,
            })
        })
        .collect();

    OrderSummaryDto {
        total_revenue: revenue.total_revenue,
        average_order_value: revenue.average_order_value,
        status_breakdown,
    }
}

/// Groups orders by creation period, then by status, sorted by period ascending.
pub fn order_period_stats(orders: &[OrderFigure], group_by: GroupBy) -> Vec<OrderPeriodStatsDto> {
    let mut periods: BTreeMap<String, Vec<&OrderFigure>> = BTreeMap::new();
    for order in orders {
        periods
            .entry(period_key(order.created_at, group_by))
            .or_default()
            .push(order);
    }

    periods
        .into_iter()
        .map(|(period, rows)| {
            let status_breakdown = OrderStatus::ALL
                .iter()
                .filter_map(|status| {
                    let matching: Vec<f64> = rows
                        .iter()
                        .filter(|o| o.status == *status)
                        .map(|o| o.total_amount)
                        .collect();
                    if matching.is_empty() {
                        return None;
                    }
                    let revenue: f64 = matching.iter().sum();
                    Some(StatusStatsDto {
                        status: *status,
                        count: matching.len() as u64,
                        revenue: round_money(revenue),
                        avg_value: average(revenue, matching.len() as u64),
                    })
                })
                .collect();

            OrderPeriodStatsDto {
                period,
                status_breakdown,
                total_orders: rows.len() as u64,
                total_revenue: round_money(rows.iter().map(|o| o.total_amount).sum()),
            }
        })
        .collect()
}

fn empty_point(period: String) -> AnalyticsPointDto {
    AnalyticsPointDto {
        period,
        revenue: None,
        orders: None,
        client_signups: None,
        partner_signups: None,
        count: None,
    }
}

/// Per-day revenue and order count.
pub fn daily_revenue(orders: &[OrderFigure]) -> Vec<AnalyticsPointDto> {
    let mut days: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for order in orders {
        let entry = days
            .entry(period_key(order.created_at, GroupBy::Day))
            .or_default();
        entry.0 += order.total_amount;
        entry.1 += 1;
    }

    days.into_iter()
        .map(|(period, (revenue, orders))| AnalyticsPointDto {
            revenue: Some(round_money(revenue)),
            orders: Some(orders),
            ..empty_point(period)
        })
        .collect()
}

/// Per-day record counts.
pub fn daily_counts(timestamps: &[DateTime<Utc>]) -> Vec<AnalyticsPointDto> {
    let mut days: BTreeMap<String, u64> = BTreeMap::new();
    for at in timestamps {
        *days.entry(period_key(*at, GroupBy::Day)).or_default() += 1;
    }

    days.into_iter()
        .map(|(period, count)| AnalyticsPointDto {
            count: Some(count),
            ..empty_point(period)
        })
        .collect()
}

/// Per-day client and partner sign-ups; days with only one kind report zero for the other.
pub fn daily_signups(
    clients: &[DateTime<Utc>],
    partners: &[DateTime<Utc>],
) -> Vec<AnalyticsPointDto> {
    let mut days: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for at in clients {
        days.entry(period_key(*at, GroupBy::Day)).or_default().0 += 1;
    }
    for at in partners {
        days.entry(period_key(*at, GroupBy::Day)).or_default().1 += 1;
    }

    days.into_iter()
        .map(|(period, (clients, partners))| AnalyticsPointDto {
            client_signups: Some(clients),
            partner_signups: Some(partners),
            ..empty_point(period)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn figure(status: OrderStatus, total_amount: f64, created_at: DateTime<Utc>) -> OrderFigure {
        OrderFigure {
            status,
            total_amount,
            created_at,
        }
    }

    #[test]
    fn formats_period_keys() {
        let date = at(2024, 3, 14);
        assert_eq!(period_key(date, GroupBy::Day), "2024-03-14");
        assert_eq!(period_key(date, GroupBy::Week), "2024-10");
        assert_eq!(period_key(date, GroupBy::Month), "2024-03");
        assert_eq!(period_key(date, GroupBy::Year), "2024");
    }

    #[test]
    fn groups_orders_by_period_and_status() {
        let orders = vec![
            figure(OrderStatus::Completed, 30_000.0, at(2024, 2, 10)),
            figure(OrderStatus::Pending, 10_000.0, at(2024, 1, 5)),
            figure(OrderStatus::Completed, 20_000.0, at(2024, 1, 20)),
            figure(OrderStatus::Completed, 10_000.0, at(2024, 1, 21)),
        ];

        let stats = order_period_stats(&orders, GroupBy::Month);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].period, "2024-01");
        assert_eq!(stats[0].total_orders, 3);
        assert_eq!(stats[0].total_revenue, 40_000.0);
        assert_eq!(stats[0].status_breakdown[0].status, OrderStatus::Pending);
        assert_eq!(stats[0].status_breakdown[1].count, 2);
        assert_eq!(stats[0].status_breakdown[1].avg_value, 15_000.0);
        assert_eq!(stats[1].period, "2024-02");
    }

    #[test]
    fn summarizes_orders() {
        let orders = vec![
            figure(OrderStatus::Completed, 100.0, at(2024, 1, 1)),
            figure(OrderStatus::Cancelled, 50.0, at(2024, 1, 2)),
            figure(OrderStatus::Completed, 150.0, at(2024, 1, 3)),
        ];

        let summary = summarize_orders(&orders);

        assert_eq!(summary.total_revenue, 300.0);
        assert_eq!(summary.average_order_value, 100.0);
        assert_eq!(
            summary.status_breakdown,
            vec![
                StatusCountDto {
                    status: OrderStatus::Completed,
                    count: 2
                },
                StatusCountDto {
                    status: OrderStatus::Cancelled,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn empty_summary_has_zero_average() {
        let summary = summarize_orders(&[]);
        assert_eq!(summary.average_order_value, 0.0);
        assert!(summary.status_breakdown.is_empty());
    }

    #[test]
    fn merges_signups_per_day() {
        let points = daily_signups(
            &[at(2024, 5, 1), at(2024, 5, 1)],
            &[at(2024, 5, 2)],
        );

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].client_signups, Some(2));
        assert_eq!(points[0].partner_signups, Some(0));
        assert_eq!(points[1].partner_signups, Some(1));
    }

    #[test]
    fn reports_daily_revenue() {
        let points = daily_revenue(&[
            figure(OrderStatus::Pending, 99.5, at(2024, 5, 1)),
            figure(OrderStatus::Pending, 0.5, at(2024, 5, 1)),
        ]);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].revenue, Some(100.0));
        assert_eq!(points[0].orders, Some(2));
        assert_eq!(points[0].count, None);
    }
}
