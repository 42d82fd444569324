use crate::{
    model::enums::{CurrentStage, OrderStatus, PaymentStatus},
    server::{
        data::order::OrderRepository,
        error::AppError,
        filter::{order::OrderField, FilterDocument, FilterValue},
        model::order::OrderState,
    },
};
use test_utils::{builder::TestBuilder, factory, factory::order::OrderFactory};

mod figures;
mod set_state;
