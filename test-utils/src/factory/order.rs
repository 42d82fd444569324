//! Order factory for creating test orders.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test orders between an existing client and partner.
///
/// Status, stage and progress are stored exactly as given; the factory does not enforce
/// lifecycle rules so tests can seed any state directly.
pub struct OrderFactory<'a> {
    db: &'a DatabaseConnection,
    client_id: i32,
    partner_id: i32,
    order_name: String,
    event_type: Option<String>,
    event_name: Option<String>,
    venue: Option<String>,
    city: Option<String>,
    event_date_time: DateTime<Utc>,
    booking_date_time: DateTime<Utc>,
    base_price: f64,
    total_amount: f64,
    status: String,
    current_stage: Option<String>,
    progress_percentage: i32,
    payment_status: String,
    created_at: DateTime<Utc>,
}

impl<'a> OrderFactory<'a> {
    /// Creates a new OrderFactory with default values.
    ///
    /// Defaults:
    /// - order_name: `"Order {id}"`
    /// - event in 30 days, booked now
    /// - base and total amount: `1000.0`
    /// - status: `"pending"`, no stage, progress 0, payment pending
    pub fn new(db: &'a DatabaseConnection, client_id: i32, partner_id: i32) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            client_id,
            partner_id,
            order_name: format!("Order {}", id),
            event_type: None,
            event_name: None,
            venue: None,
            city: None,
            event_date_time: now + Duration::days(30),
            booking_date_time: now,
            base_price: 1000.0,
            total_amount: 1000.0,
            status: "pending".to_string(),
            current_stage: None,
            progress_percentage: 0,
            payment_status: "pending".to_string(),
            created_at: now,
        }
    }

    pub fn order_name(mut self, order_name: impl Into<String>) -> Self {
        self.order_name = order_name.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }

    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn event_date_time(mut self, event_date_time: DateTime<Utc>) -> Self {
        self.event_date_time = event_date_time;
        self
    }

    /// Sets both base price and total amount.
    pub fn amount(mut self, amount: f64) -> Self {
        self.base_price = amount;
        self.total_amount = amount;
        self
    }

    /// Sets the stored lifecycle columns directly.
    pub fn state(
        mut self,
        status: impl Into<String>,
        current_stage: Option<&str>,
        progress_percentage: i32,
    ) -> Self {
        self.status = status.into();
        self.current_stage = current_stage.map(str::to_string);
        self.progress_percentage = progress_percentage;
        self
    }

    pub fn payment_status(mut self, payment_status: impl Into<String>) -> Self {
        self.payment_status = payment_status.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the order.
    ///
    /// # Returns
    /// - `Ok(entity::order::Model)` - Created order
    /// - `Err(DbErr)` - Database error during insert (including missing client or partner)
    pub async fn build(self) -> Result<entity::order::Model, DbErr> {
        entity::order::ActiveModel {
            order_code: ActiveValue::Set(format!("ORD_TEST_{}", next_id())),
            order_name: ActiveValue::Set(self.order_name),
            client_id: ActiveValue::Set(self.client_id),
            partner_id: ActiveValue::Set(self.partner_id),
            event_type: ActiveValue::Set(self.event_type),
            event_name: ActiveValue::Set(self.event_name),
            event_description: ActiveValue::Set(None),
            guest_count: ActiveValue::Set(None),
            event_date_time: ActiveValue::Set(self.event_date_time),
            booking_date_time: ActiveValue::Set(self.booking_date_time),
            venue: ActiveValue::Set(self.venue),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(None),
            country: ActiveValue::Set(None),
            base_price: ActiveValue::Set(self.base_price),
            additional_charges: ActiveValue::Set(serde_json::json!([])),
            discount_amount: ActiveValue::Set(0.0),
            discount_reason: ActiveValue::Set(None),
            tax_amount: ActiveValue::Set(0.0),
            tax_percentage: ActiveValue::Set(None),
            total_amount: ActiveValue::Set(self.total_amount),
            status: ActiveValue::Set(self.status),
            current_stage: ActiveValue::Set(self.current_stage),
            progress_percentage: ActiveValue::Set(self.progress_percentage),
            payment_status: ActiveValue::Set(self.payment_status),
            special_instructions: ActiveValue::Set(None),
            data_providing_method: ActiveValue::Set("cloud_storage".to_string()),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending order with default values.
pub async fn create_order(
    db: &DatabaseConnection,
    client_id: i32,
    partner_id: i32,
) -> Result<entity::order::Model, DbErr> {
    OrderFactory::new(db, client_id, partner_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use crate::factory::helpers::create_order_with_dependencies;

    #[tokio::test]
    async fn creates_order_with_dependencies() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (client, partner, order) = create_order_with_dependencies(db).await?;

        assert_eq!(order.client_id, client.id);
        assert_eq!(order.partner_id, partner.id);
        assert_eq!(order.status, "pending");
        assert_eq!(order.progress_percentage, 0);

        Ok(())
    }
}
