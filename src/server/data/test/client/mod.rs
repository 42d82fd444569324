use crate::server::{data::client::ClientRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory, factory::client::ClientFactory};

mod append_activity;
mod delete;
mod favourites;
mod is_taken;
