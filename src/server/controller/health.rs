use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::api::{HealthDto, RouteNotFoundDto, WelcomeDto},
    server::state::AppState,
};

pub static HEALTH_TAG: &str = "health";

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry points advertised by the not found response.
const AVAILABLE_ROUTES: &[&str] = &[
    "GET /api/health",
    "POST /api/auth/register",
    "POST /api/auth/login",
    "GET /api/clients",
    "GET /api/partners",
    "GET /api/orders",
    "GET /api/books",
    "GET /api/admins/dashboard",
    "GET /api/docs",
];

#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is running", body = HealthDto)
    ),
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthDto {
            status: "OK".to_string(),
            message: "Pixisphere API is running".to_string(),
            timestamp: Utc::now(),
            version: API_VERSION.to_string(),
            environment: state.app_env.clone(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Pointers to the documentation and health check", body = WelcomeDto)
    ),
)]
pub async fn welcome() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(WelcomeDto {
            message: "Welcome to Pixisphere API".to_string(),
            version: API_VERSION.to_string(),
            documentation: "/api/docs".to_string(),
            health: "/api/health".to_string(),
        }),
    )
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundDto {
            success: false,
            message: format!("Route {} not found", uri),
            available_routes: AVAILABLE_ROUTES.iter().map(|r| r.to_string()).collect(),
        }),
    )
}
