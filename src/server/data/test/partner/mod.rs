use crate::{
    model::{
        enums::{PartnerSort, ShootType, SortOrder, TransactionKind},
        partner::TransactionDto,
    },
    server::{
        data::partner::PartnerRepository,
        error::AppError,
        filter::{partner::PartnerField, FilterDocument, FilterValue},
        model::listing::ListQuery,
    },
};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory, factory::partner::PartnerFactory};

mod get_paginated;
mod record_transaction;
mod search;
