use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{
    model::enums::{PermissionAction, PermissionModule, UserType},
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::auth::AuthenticatedUser,
        service::token::tests::identity_token,
        state::AppState,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod authenticate;
mod require;

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
