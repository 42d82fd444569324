//! Order domain model, lifecycle state machine and pricing.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        enums::{CurrentStage, DataProvidingMethod, OrderStatus, PaymentStatus},
        order::{
            ChargeDto, CreateOrderDto, DiscountDto, EventDetailsDto, OrderDto, OrderLocationDto,
            PricingDto, ProgressDto, TaxDto, UpdateOrderDto,
        },
    },
    server::{
        error::AppError,
        model::{parse_json_column, parse_stored},
        util::validate::Validator,
    },
};

/// Milestones an in-progress order moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeliveryStage {
    Preparation,
    ShootDay,
    PostProcessing,
    Delivery,
}

impl DeliveryStage {
    pub fn next(self) -> Option<Self> {
        match self {
            DeliveryStage::Preparation => Some(DeliveryStage::ShootDay),
            DeliveryStage::ShootDay => Some(DeliveryStage::PostProcessing),
            DeliveryStage::PostProcessing => Some(DeliveryStage::Delivery),
            DeliveryStage::Delivery => None,
        }
    }

    fn from_current_stage(stage: CurrentStage) -> Option<Self> {
        match stage {
            CurrentStage::Preparation => Some(DeliveryStage::Preparation),
            CurrentStage::ShootDay => Some(DeliveryStage::ShootDay),
            CurrentStage::PostProcessing => Some(DeliveryStage::PostProcessing),
            CurrentStage::Delivery => Some(DeliveryStage::Delivery),
            CurrentStage::BookingConfirmed | CurrentStage::Completed => None,
        }
    }

    fn as_current_stage(self) -> CurrentStage {
        match self {
            DeliveryStage::Preparation => CurrentStage::Preparation,
            DeliveryStage::ShootDay => CurrentStage::ShootDay,
            DeliveryStage::PostProcessing => CurrentStage::PostProcessing,
            DeliveryStage::Delivery => CurrentStage::Delivery,
        }
    }
}

/// Lifecycle of an order. The `status`, `current_stage` and `progress_percentage` columns
/// are all derived from this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Pending,
    Confirmed,
    InProgress(DeliveryStage),
    Completed,
    Cancelled,
    Refunded,
}

impl OrderState {
    /// Rebuilds the state from stored columns. An in-progress row without a recognised
    /// stage is treated as being in preparation.
    pub fn from_columns(status: OrderStatus, stage: Option<CurrentStage>) -> Self {
        match status {
            OrderStatus::Pending => OrderState::Pending,
            OrderStatus::Confirmed => OrderState::Confirmed,
            OrderStatus::InProgress => OrderState::InProgress(
                stage
                    .and_then(DeliveryStage::from_current_stage)
                    .unwrap_or(DeliveryStage::Preparation),
            ),
            OrderStatus::Completed => OrderState::Completed,
            OrderStatus::Cancelled => OrderState::Cancelled,
            OrderStatus::Refunded => OrderState::Refunded,
        }
    }

    pub fn status(&self) -> OrderStatus {
        match self {
            OrderState::Pending => OrderStatus::Pending,
            OrderState::Confirmed => OrderStatus::Confirmed,
            OrderState::InProgress(_) => OrderStatus::InProgress,
            OrderState::Completed => OrderStatus::Completed,
            OrderState::Cancelled => OrderStatus::Cancelled,
            OrderState::Refunded => OrderStatus::Refunded,
        }
    }

    pub fn current_stage(&self) -> Option<CurrentStage> {
        match self {
            OrderState::Confirmed => Some(CurrentStage::BookingConfirmed),
            OrderState::InProgress(stage) => Some(stage.as_current_stage()),
            OrderState::Completed => Some(CurrentStage::Completed),
            OrderState::Pending | OrderState::Cancelled | OrderState::Refunded => None,
        }
    }

    pub fn progress(&self) -> i32 {
        match self {
            OrderState::Pending => 0,
            OrderState::Confirmed => 10,
            OrderState::InProgress(DeliveryStage::Preparation) => 25,
            OrderState::InProgress(DeliveryStage::ShootDay) => 50,
            OrderState::InProgress(DeliveryStage::PostProcessing) => 70,
            OrderState::InProgress(DeliveryStage::Delivery) => 90,
            OrderState::Completed => 100,
            OrderState::Cancelled | OrderState::Refunded => 0,
        }
    }

    /// Applies a requested status change.
    ///
    /// Moving to `in_progress` without a stage advances to the next milestone; with a stage
    /// it jumps forward to that milestone.
    ///
    /// # Returns
    /// - `Ok(OrderState)` - The new state
    /// - `Err(AppError::BadRequest)` - The stage is not a delivery milestone
    /// - `Err(AppError::Conflict)` - The transition is not allowed from the current state
    pub fn transition(
        self,
        target: OrderStatus,
        stage: Option<CurrentStage>,
    ) -> Result<Self, AppError> {
        let requested_stage = match stage {
            Some(stage) if target == OrderStatus::InProgress => {
                Some(DeliveryStage::from_current_stage(stage).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "currentStage {} is not a delivery stage",
                        stage
                    ))
                })?)
            }
            _ => None,
        };

        let next = match (self, target) {
            (OrderState::Pending, OrderStatus::Confirmed) => Some(OrderState::Confirmed),
            (OrderState::Confirmed, OrderStatus::InProgress) => Some(OrderState::InProgress(
                requested_stage.unwrap_or(DeliveryStage::Preparation),
            )),
            (OrderState::InProgress(current), OrderStatus::InProgress) => match requested_stage {
                Some(stage) if stage > current => Some(OrderState::InProgress(stage)),
                Some(_) => None,
                None => current.next().map(OrderState::InProgress),
            },
            (OrderState::InProgress(_), OrderStatus::Completed) => Some(OrderState::Completed),
            (
                OrderState::Pending | OrderState::Confirmed | OrderState::InProgress(_),
                OrderStatus::Cancelled,
            ) => Some(OrderState::Cancelled),
            (OrderState::Completed | OrderState::Cancelled, OrderStatus::Refunded) => {
                Some(OrderState::Refunded)
            }
            _ => None,
        };

        next.ok_or_else(|| {
            AppError::Conflict(format!(
                "Cannot change order status from {} to {}",
                self.status(),
                target
            ))
        })
    }
}

/// Server-side pricing breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    pub base_price: f64,
    pub additional_charges: Vec<ChargeDto>,
    pub discount_amount: f64,
    pub discount_reason: Option<String>,
    pub tax_amount: f64,
    pub tax_percentage: Option<f64>,
    pub total_amount: f64,
}

impl Pricing {
    /// `total = base + charges - discount + tax`, where a tax percentage applies to the
    /// discounted subtotal and otherwise the flat tax amount is used. Money values are
    /// rounded to two decimals.
    pub fn compute(
        base_price: f64,
        additional_charges: Vec<ChargeDto>,
        discount_amount: f64,
        discount_reason: Option<String>,
        tax_percentage: Option<f64>,
        tax_amount: Option<f64>,
    ) -> Self {
        let charges: f64 = additional_charges.iter().map(|c| c.amount).sum();
        let subtotal = base_price + charges - discount_amount;
        let tax_amount = match tax_percentage {
            Some(percentage) => round_money(subtotal * percentage / 100.0),
            None => tax_amount.unwrap_or(0.0),
        };

        Self {
            base_price,
            additional_charges,
            discount_amount,
            discount_reason,
            tax_amount,
            tax_percentage,
            total_amount: round_money(subtotal + tax_amount),
        }
    }

    pub fn into_dto(self) -> PricingDto {
        PricingDto {
            base_price: self.base_price,
            additional_charges: self.additional_charges,
            discount: DiscountDto {
                amount: self.discount_amount,
                reason: self.discount_reason,
            },
            tax: TaxDto {
                amount: self.tax_amount,
                percentage: self.tax_percentage,
            },
            total_amount: self.total_amount,
        }
    }
}

fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub order_code: String,
    pub order_name: String,
    pub client_id: i32,
    pub partner_id: i32,
    pub event: EventDetailsDto,
    pub event_date_time: DateTime<Utc>,
    pub booking_date_time: DateTime<Utc>,
    pub location: OrderLocationDto,
    pub pricing: Pricing,
    pub state: OrderState,
    pub payment_status: PaymentStatus,
    pub special_instructions: Option<String>,
    pub data_providing_method: DataProvidingMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn from_entity(entity: entity::order::Model) -> Result<Self, AppError> {
        let status: OrderStatus = parse_stored("status", &entity.status)?;
        let stage = entity
            .current_stage
            .as_deref()
            .map(|s| parse_stored::<CurrentStage>("current_stage", s))
            .transpose()?;

        Ok(Self {
            id: entity.id,
            order_code: entity.order_code,
            order_name: entity.order_name,
            client_id: entity.client_id,
            partner_id: entity.partner_id,
            event: EventDetailsDto {
                event_type: entity.event_type,
                event_name: entity.event_name,
                description: entity.event_description,
                guest_count: entity.guest_count,
            },
            event_date_time: entity.event_date_time,
            booking_date_time: entity.booking_date_time,
            location: OrderLocationDto {
                venue: entity.venue,
                city: entity.city,
                state: entity.state,
                country: entity.country,
            },
            pricing: Pricing {
                base_price: entity.base_price,
                additional_charges: parse_json_column(
                    "additional_charges",
                    entity.additional_charges,
                )?,
                discount_amount: entity.discount_amount,
                discount_reason: entity.discount_reason,
                tax_amount: entity.tax_amount,
                tax_percentage: entity.tax_percentage,
                total_amount: entity.total_amount,
            },
            state: OrderState::from_columns(status, stage),
            payment_status: parse_stored("payment_status", &entity.payment_status)?,
            special_instructions: entity.special_instructions,
            data_providing_method: parse_stored(
                "data_providing_method",
                &entity.data_providing_method,
            )?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Whole days since booking.
    pub fn age_days(&self) -> i64 {
        (Utc::now() - self.booking_date_time).num_days()
    }

    pub fn into_dto(self) -> OrderDto {
        let order_age_days = self.age_days();
        OrderDto {
            id: self.id,
            order_id: self.order_code,
            order_name: self.order_name,
            client_id: self.client_id,
            partner_id: self.partner_id,
            event_details: self.event,
            event_date_time: self.event_date_time,
            booking_date_time: self.booking_date_time,
            location: self.location,
            pricing: self.pricing.into_dto(),
            status: self.state.status(),
            progress: ProgressDto {
                current_stage: self.state.current_stage(),
                percentage: self.state.progress(),
            },
            payment_status: self.payment_status,
            special_instructions: self.special_instructions,
            data_providing_method: self.data_providing_method,
            order_age_days,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderParams {
    pub order_name: String,
    pub client_id: i32,
    pub partner_id: i32,
    pub event: EventDetailsDto,
    pub event_date_time: DateTime<Utc>,
    pub location: OrderLocationDto,
    pub pricing: Pricing,
    pub special_instructions: Option<String>,
    pub data_providing_method: DataProvidingMethod,
}

impl CreateOrderParams {
    /// Validates an order request and computes its pricing.
    ///
    /// `client_id` is the already resolved client placing the order.
    pub fn from_dto(dto: CreateOrderDto, client_id: i32) -> Result<Self, AppError> {
        let mut v = Validator::new();
        v.length("orderName", &dto.order_name, 1, 200);
        v.range("pricing.basePrice", Some(dto.pricing.base_price), 0.0, f64::MAX);
        v.range("pricing.discountAmount", dto.pricing.discount_amount, 0.0, f64::MAX);
        v.range("pricing.taxPercentage", dto.pricing.tax_percentage, 0.0, 100.0);
        v.range("pricing.taxAmount", dto.pricing.tax_amount, 0.0, f64::MAX);
        if dto
            .pricing
            .additional_charges
            .iter()
            .any(|c| !c.amount.is_finite() || c.amount < 0.0)
        {
            v.push("pricing.additionalCharges", "amounts must be >= 0");
        }
        v.max_length("specialInstructions", dto.special_instructions.as_deref(), 1000);
        if let Some(guests) = dto.event_details.as_ref().and_then(|e| e.guest_count) {
            if guests < 0 {
                v.push("eventDetails.guestCount", "must be >= 0");
            }
        }

        let pricing = Pricing::compute(
            dto.pricing.base_price,
            dto.pricing.additional_charges,
            dto.pricing.discount_amount.unwrap_or(0.0),
            dto.pricing.discount_reason,
            dto.pricing.tax_percentage,
            dto.pricing.tax_amount,
        );
        if pricing.total_amount < 0.0 {
            v.push("pricing.discountAmount", "discount exceeds the order value");
        }
        v.finish()?;

        Ok(Self {
            order_name: dto.order_name.trim().to_string(),
            client_id,
            partner_id: dto.partner_id,
            event: dto.event_details.unwrap_or_default(),
            event_date_time: dto.event_date_time,
            location: dto.location.unwrap_or_default(),
            pricing,
            special_instructions: dto.special_instructions,
            data_providing_method: dto.data_providing_method.unwrap_or_default(),
        })
    }
}

/// Descriptive fields editable after placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOrderParams {
    pub order_name: Option<String>,
    pub event: Option<EventDetailsDto>,
    pub event_date_time: Option<DateTime<Utc>>,
    pub location: Option<OrderLocationDto>,
    pub special_instructions: Option<String>,
    pub data_providing_method: Option<DataProvidingMethod>,
    pub payment_status: Option<PaymentStatus>,
}

impl UpdateOrderParams {
    pub fn from_dto(dto: UpdateOrderDto) -> Result<Self, AppError> {
        let mut v = Validator::new();
        if let Some(name) = &dto.order_name {
            v.length("orderName", name, 1, 200);
        }
        v.max_length("specialInstructions", dto.special_instructions.as_deref(), 1000);
        v.finish()?;

        Ok(Self {
            order_name: dto.order_name.map(|n| n.trim().to_string()),
            event: dto.event_details,
            event_date_time: dto.event_date_time,
            location: dto.location,
            special_instructions: dto.special_instructions,
            data_providing_method: dto.data_providing_method,
            payment_status: dto.payment_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_columns_from_state() {
        let cases = [
            (OrderState::Pending, OrderStatus::Pending, None, 0),
            (
                OrderState::Confirmed,
                OrderStatus::Confirmed,
                Some(CurrentStage::BookingConfirmed),
                10,
            ),
            (
                OrderState::InProgress(DeliveryStage::ShootDay),
                OrderStatus::InProgress,
                Some(CurrentStage::ShootDay),
                50,
            ),
            (
                OrderState::Completed,
                OrderStatus::Completed,
                Some(CurrentStage::Completed),
                100,
            ),
            (OrderState::Refunded, OrderStatus::Refunded, None, 0),
        ];

        for (state, status, stage, progress) in cases {
            assert_eq!(state.status(), status);
            assert_eq!(state.current_stage(), stage);
            assert_eq!(state.progress(), progress);
        }
    }

    #[test]
    fn walks_the_happy_path() {
        let mut state = OrderState::Pending;
        let steps = [
            OrderStatus::Confirmed,
            OrderStatus::InProgress,
            OrderStatus::InProgress,
            OrderStatus::InProgress,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Refunded,
        ];
        let mut progress = Vec::new();
        for target in steps {
            state = state.transition(target, None).unwrap();
            progress.push(state.progress());
        }

        assert_eq!(progress, vec![10, 25, 50, 70, 90, 100, 0]);
        assert_eq!(state, OrderState::Refunded);
    }

    #[test]
    fn rejects_illegal_transitions() {
        let illegal = [
            (OrderState::Pending, OrderStatus::Completed),
            (OrderState::Pending, OrderStatus::InProgress),
            (OrderState::Confirmed, OrderStatus::Confirmed),
            (OrderState::Completed, OrderStatus::Cancelled),
            (OrderState::Cancelled, OrderStatus::Confirmed),
            (OrderState::Refunded, OrderStatus::Refunded),
            (OrderState::Pending, OrderStatus::Refunded),
            (OrderState::InProgress(DeliveryStage::Delivery), OrderStatus::InProgress),
        ];

        for (state, target) in illegal {
            assert!(
                matches!(state.transition(target, None), Err(AppError::Conflict(_))),
                "{:?} -> {:?} should be rejected",
                state,
                target
            );
        }
    }

    #[test]
    fn stage_jumps_forward_only() {
        let state = OrderState::InProgress(DeliveryStage::ShootDay);
        assert_eq!(
            state
                .transition(OrderStatus::InProgress, Some(CurrentStage::Delivery))
                .unwrap(),
            OrderState::InProgress(DeliveryStage::Delivery)
        );
        assert!(matches!(
            state.transition(OrderStatus::InProgress, Some(CurrentStage::Preparation)),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            state.transition(OrderStatus::InProgress, Some(CurrentStage::BookingConfirmed)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn cancellation_allowed_before_completion() {
        for state in [
            OrderState::Pending,
            OrderState::Confirmed,
            OrderState::InProgress(DeliveryStage::PostProcessing),
        ] {
            assert_eq!(
                state.transition(OrderStatus::Cancelled, None).unwrap(),
                OrderState::Cancelled
            );
        }
    }

    #[test]
    fn computes_pricing_with_percentage_tax() {
        let pricing = Pricing::compute(
            10_000.0,
            vec![ChargeDto {
                description: "Travel".to_string(),
                amount: 2_000.0,
            }],
            1_000.0,
            Some("Returning client".to_string()),
            Some(18.0),
            Some(5.0),
        );

        assert_eq!(pricing.tax_amount, 1_980.0);
        assert_eq!(pricing.total_amount, 12_980.0);
    }

    #[test]
    fn computes_pricing_with_flat_tax() {
        let pricing = Pricing::compute(25_000.0, vec![], 0.0, None, None, Some(500.0));
        assert_eq!(pricing.total_amount, 25_500.0);

        let untaxed = Pricing::compute(25_000.0, vec![], 0.0, None, None, None);
        assert_eq!(untaxed.total_amount, 25_000.0);
    }
}
