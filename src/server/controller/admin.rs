use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        admin::{AnalyticsDto, DashboardDto, SystemHealthDto},
        api::{ApiResponse, ErrorDto},
        enums::{AnalyticsMetric, AnalyticsPeriod},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::admin::AdminService,
        state::AppState,
        util::{query::QueryParams, validate::Validator},
    },
};

pub static ADMIN_TAG: &str = "admins";

#[utoipa::path(
    get,
    path = "/api/admins/dashboard",
    tag = ADMIN_TAG,
    params(
        ("dateFrom" = Option<String>, Query, description = "Count records created on or after"),
        ("dateTo" = Option<String>, Query, description = "Count records created on or before")
    ),
    responses(
        (status = 200, description = "Dashboard overview", body = ApiResponse<DashboardDto>),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let mut v = Validator::new();
    let date_from = v.date("dateFrom", params.get("dateFrom"));
    let date_to = v.date("dateTo", params.get("dateTo"));
    v.finish()?;

    let dashboard = AdminService::new(&state.db)
        .dashboard(date_from, date_to)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            dashboard,
            "Dashboard data retrieved successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admins/analytics",
    tag = ADMIN_TAG,
    params(
        ("period" = Option<AnalyticsPeriod>, Query, description = "7d, 30d, 90d or 1y (default: 30d)"),
        ("metric" = Option<AnalyticsMetric>, Query, description = "revenue, orders, users or engagement (default: revenue)")
    ),
    responses(
        (status = 200, description = "Per-day series", body = ApiResponse<AnalyticsDto>),
        (status = 400, description = "Unknown period or metric", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let mut v = Validator::new();
    let period: AnalyticsPeriod = v.one_of("period", params.get("period")).unwrap_or_default();
    let metric: AnalyticsMetric = v.one_of("metric", params.get("metric")).unwrap_or_default();
    v.finish()?;

    let analytics = AdminService::new(&state.db).analytics(period, metric).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            analytics,
            "Analytics data retrieved successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admins/system-health",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Database status, uptime and recently active users", body = ApiResponse<SystemHealthDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_system_health(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let health = AdminService::new(&state.db)
        .system_health(state.started_at)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            health,
            "System health retrieved successfully",
        )),
    ))
}
