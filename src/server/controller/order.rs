use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        enums::{GroupBy, OrderSort, UserType},
        order::{
            CreateOrderDto, OrderDto, OrderPeriodStatsDto, UpdateOrderDto, UpdateOrderStatusDto,
        },
    },
    server::{
        controller::echo,
        error::{validation::FieldError, AppError},
        filter::order::OrderFilterParams,
        middleware::auth::{AuthGuard, Permission},
        model::{
            auth::AuthenticatedUser,
            listing::ListQuery,
            order::{CreateOrderParams, Order, UpdateOrderParams},
        },
        service::order::OrderService,
        state::AppState,
        util::{extract::ApiJson, query::QueryParams, validate::Validator},
    },
};

pub static ORDER_TAG: &str = "orders";

fn order_not_found() -> AppError {
    AppError::NotFound("Order not found".to_string())
}

/// Loads an order and checks the caller is one of its parties or an admin.
async fn participant_order(
    state: &AppState,
    user: &AuthenticatedUser,
    id: i32,
) -> Result<Order, AppError> {
    let order = OrderService::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(order_not_found)?;

    AuthGuard::authorize(
        user,
        &[Permission::OrderParticipant {
            client_id: order.client_id,
            partner_id: order.partner_id,
        }],
    )?;

    Ok(order)
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("sortBy" = Option<OrderSort>, Query, description = "Sort field (default: createdAt)"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc (default: desc)"),
        ("search" = Option<String>, Query, description = "Matches order name, code or event name"),
        ("clientId" = Option<i32>, Query, description = "Client ID"),
        ("partnerId" = Option<i32>, Query, description = "Partner ID"),
        ("status" = Option<Vec<String>>, Query, description = "Any of these statuses"),
        ("orderName" = Option<String>, Query, description = "Order name contains"),
        ("location" = Option<String>, Query, description = "Venue city contains"),
        ("eventType" = Option<String>, Query, description = "Event type contains"),
        ("minAmount" = Option<f64>, Query, description = "Minimum total amount"),
        ("maxAmount" = Option<f64>, Query, description = "Maximum total amount"),
        ("paymentStatus" = Option<String>, Query, description = "Payment status"),
        ("eventDateFrom" = Option<String>, Query, description = "Event on or after"),
        ("eventDateTo" = Option<String>, Query, description = "Event on or before"),
        ("bookingDateFrom" = Option<String>, Query, description = "Booked on or after"),
        ("bookingDateTo" = Option<String>, Query, description = "Booked on or before"),
        ("progressMin" = Option<i64>, Query, description = "Minimum progress percentage"),
        ("progressMax" = Option<i64>, Query, description = "Maximum progress percentage"),
        ("currentStage" = Option<String>, Query, description = "Delivery stage")
    ),
    responses(
        (status = 200, description = "Page of orders with a summary over all matches", body = ApiResponse<Vec<OrderDto>>),
        (status = 400, description = "Invalid query parameters", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let mut v = Validator::new();
    let query = ListQuery::<OrderSort>::from_query(&params, &mut v);
    let filters = OrderFilterParams::from_query(&params, &mut v);
    v.finish()?;

    let (page, summary) = OrderService::new(&state.db).list(&filters, &query).await?;
    let pagination = page.pagination();
    let dto = page.map(|order| order.into_dto());

    Ok((
        StatusCode::OK,
        Json(
            ApiResponse::ok(dto.items, "Orders retrieved successfully")
                .with_pagination(pagination)
                .with_filters(echo(&filters)?)
                .with_summary(echo(&summary)?),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = ApiResponse<OrderDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a party to the order", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;

    let order = participant_order(&state, &user, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            order.into_dto(),
            "Order retrieved successfully",
        )),
    ))
}

/// Clients order for themselves; admins must name the client in `clientId`.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = ORDER_TAG,
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderDto>),
        (status = 400, description = "Invalid order data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is a partner", body = ErrorDto),
        (status = 404, description = "Client or partner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;

    let client_id = if user.is_admin() {
        payload.client_id.ok_or_else(|| {
            AppError::Validation(vec![FieldError::new(
                "clientId",
                "is required when an admin places an order",
            )])
        })?
    } else {
        AuthGuard::authorize(&user, &[Permission::Role(UserType::Client)])?;
        user.id()
    };

    let params = CreateOrderParams::from_dto(payload, client_id)?;

    let order = OrderService::new(&state.db).create(params).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(order.into_dto(), "Order created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderDto,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<OrderDto>),
        (status = 400, description = "Invalid order data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a party to the order", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;
    participant_order(&state, &user, id).await?;

    let params = UpdateOrderParams::from_dto(payload)?;

    let order = OrderService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(order_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(order.into_dto(), "Order updated successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Order moved to the new state", body = ApiResponse<OrderDto>),
        (status = 400, description = "Stage is not valid for the status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a party to the order", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Transition not allowed from the current state", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateOrderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;
    participant_order(&state, &user, id).await?;

    let order = OrderService::new(&state.db)
        .update_status(id, payload.status, payload.current_stage)
        .await?
        .ok_or_else(order_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            order.into_dto(),
            "Order status updated successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders/analytics/dashboard",
    tag = ORDER_TAG,
    params(
        ("dateFrom" = Option<String>, Query, description = "Created on or after"),
        ("dateTo" = Option<String>, Query, description = "Created on or before"),
        ("groupBy" = Option<GroupBy>, Query, description = "day, week, month or year (default: day)")
    ),
    responses(
        (status = 200, description = "Order statistics per period", body = ApiResponse<Vec<OrderPeriodStatsDto>>),
        (status = 400, description = "Invalid query parameters", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn order_analytics(
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
    let group_by: GroupBy = v.one_of("groupBy", params.get("groupBy")).unwrap_or_default();
    v.finish()?;

    let stats = OrderService::new(&state.db)
        .analytics(date_from, date_to, group_by)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            stats,
            "Order analytics retrieved successfully",
        )),
    ))
}
