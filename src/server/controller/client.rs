use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        client::{AddFavouriteDto, ClientDetailDto, ClientDto, CreateClientDto, UpdateClientDto},
        enums::{ClientSort, OrderSort, PermissionAction, PermissionModule, UserType},
        order::OrderDto,
    },
    server::{
        controller::echo,
        error::AppError,
        filter::{client::ClientFilterParams, order::ClientOrderFilterParams},
        middleware::auth::{AuthGuard, Permission},
        model::{
            client::{CreateClientParams, UpdateClientParams},
            listing::ListQuery,
        },
        service::client::ClientService,
        state::AppState,
        util::{extract::ApiJson, query::QueryParams, validate::Validator},
    },
};

pub static CLIENT_TAG: &str = "clients";

fn client_not_found() -> AppError {
    AppError::NotFound("Client not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/clients",
    tag = CLIENT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("sortBy" = Option<ClientSort>, Query, description = "Sort field (default: createdAt)"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc (default: desc)"),
        ("search" = Option<String>, Query, description = "Matches username, email or phone"),
        ("username" = Option<String>, Query, description = "Username contains"),
        ("email" = Option<String>, Query, description = "Email contains"),
        ("city" = Option<String>, Query, description = "Address city contains"),
        ("state" = Option<String>, Query, description = "Address state contains"),
        ("planType" = Option<String>, Query, description = "Plan type"),
        ("isActive" = Option<bool>, Query, description = "Active flag"),
        ("isVerified" = Option<bool>, Query, description = "Verified flag"),
        ("dateFrom" = Option<String>, Query, description = "Created on or after"),
        ("dateTo" = Option<String>, Query, description = "Created on or before")
    ),
    responses(
        (status = 200, description = "Page of clients", body = ApiResponse<Vec<ClientDto>>),
        (status = 400, description = "Invalid query parameters", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_clients(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::Admin])
        .await?;

    let mut v = Validator::new();
    let query = ListQuery::<ClientSort>::from_query(&params, &mut v);
    let filters = ClientFilterParams::from_query(&params, &mut v);
    v.finish()?;

    let page = ClientService::new(&state.db).list(&filters, &query).await?;
    let pagination = page.pagination();
    let dto = page.map(|client| client.into_dto());

    Ok((
        StatusCode::OK,
        Json(
            ApiResponse::ok(dto.items, "Clients retrieved successfully")
                .with_pagination(pagination)
                .with_filters(echo(&filters)?),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = CLIENT_TAG,
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client with favourites and recent orders", body = ApiResponse<ClientDetailDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither the client nor an admin", body = ErrorDto),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_client(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, id)])
        .await?;

    let detail = ClientService::new(&state.db)
        .get_detail(id)
        .await?
        .ok_or_else(client_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            detail.into_dto(),
            "Client retrieved successfully",
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    tag = CLIENT_TAG,
    request_body = CreateClientDto,
    responses(
        (status = 201, description = "Client created", body = ApiResponse<ClientDto>),
        (status = 400, description = "Invalid client data", body = ErrorDto),
        (status = 409, description = "Email or username already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_client(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateClientDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CreateClientParams::from_dto(payload)?;

    let client = ClientService::new(&state.db).create(params).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            client.into_dto(),
            "Client created successfully",
        )),
    ))
}

/// Partial update; `isActive` is ignored unless the caller is an admin.
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = CLIENT_TAG,
    params(("id" = i32, Path, description = "Client ID")),
    request_body = UpdateClientDto,
    responses(
        (status = 200, description = "Client updated", body = ApiResponse<ClientDto>),
        (status = 400, description = "Invalid client data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither the client nor an admin", body = ErrorDto),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 409, description = "Email or username already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_client(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateClientDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, id)])
        .await?;

    let params = UpdateClientParams::from_dto(payload, user.is_admin())?;

    let client = ClientService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(client_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            client.into_dto(),
            "Client updated successfully",
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = CLIENT_TAG,
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Admin lacks the users:delete grant", body = ErrorDto),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 409, description = "Client has orders", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_client(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::AdminGrant(
            PermissionModule::Users,
            PermissionAction::Delete,
        )])
        .await?;

    if !ClientService::new(&state.db).delete(id).await? {
        return Err(client_not_found());
    }

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Client deleted successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}/orders",
    tag = CLIENT_TAG,
    params(
        ("id" = i32, Path, description = "Client ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("sortBy" = Option<OrderSort>, Query, description = "Sort field (default: createdAt)"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc (default: desc)"),
        ("status" = Option<String>, Query, description = "Order status"),
        ("dateFrom" = Option<String>, Query, description = "Event on or after"),
        ("dateTo" = Option<String>, Query, description = "Event on or before")
    ),
    responses(
        (status = 200, description = "Page of the client's orders", body = ApiResponse<Vec<OrderDto>>),
        (status = 400, description = "Invalid query parameters", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither the client nor an admin", body = ErrorDto),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_client_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, id)])
        .await?;

    let mut v = Validator::new();
    let query = ListQuery::<OrderSort>::from_query(&params, &mut v);
    let filters = ClientOrderFilterParams::from_query(&params, &mut v);
    v.finish()?;

    let page = ClientService::new(&state.db)
        .orders(id, &filters, &query)
        .await?
        .ok_or_else(client_not_found)?;
    let pagination = page.pagination();
    let dto = page.map(|order| order.into_dto());

    Ok((
        StatusCode::OK,
        Json(
            ApiResponse::ok(dto.items, "Client orders retrieved successfully")
                .with_pagination(pagination)
                .with_filters(echo(&filters)?),
        ),
    ))
}

#[utoipa::path(
    post,
    path = "/api/clients/{id}/favourites",
    tag = CLIENT_TAG,
    params(("id" = i32, Path, description = "Client ID")),
    request_body = AddFavouriteDto,
    responses(
        (status = 200, description = "Partner added to favourites", body = ApiResponse<ClientDetailDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither the client nor an admin", body = ErrorDto),
        (status = 404, description = "Client or partner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn add_favourite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<AddFavouriteDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, id)])
        .await?;

    let detail = ClientService::new(&state.db)
        .add_favourite(id, payload.partner_id)
        .await?
        .ok_or_else(client_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            detail.into_dto(),
            "Partner added to favourites",
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}/favourites/{partner_id}",
    tag = CLIENT_TAG,
    params(
        ("id" = i32, Path, description = "Client ID"),
        ("partner_id" = i32, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Partner removed from favourites", body = ApiResponse<ClientDetailDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither the client nor an admin", body = ErrorDto),
        (status = 404, description = "Client not found or partner not a favourite", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn remove_favourite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, partner_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Client, id)])
        .await?;

    let detail = ClientService::new(&state.db)
        .remove_favourite(id, partner_id)
        .await?
        .ok_or_else(client_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            detail.into_dto(),
            "Partner removed from favourites",
        )),
    ))
}
