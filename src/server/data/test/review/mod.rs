use crate::server::{
    data::review::ReviewRepository,
    model::partner::CreateReviewParams,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod ratings_for_partner;
