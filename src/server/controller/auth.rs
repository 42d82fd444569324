use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        auth::{LinkAccountDto, LoginDto, ProfileDto, RegisterDto, TokenDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::auth::RegisterParams,
        service::auth::AuthService,
        state::AppState,
        util::extract::ApiJson,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Creates a local client or partner account for the identity in the bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<ProfileDto>),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 409, description = "Identity, email or username already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let claims = AuthGuard::new(&state, &headers).identity()?;
    let params = RegisterParams::from_dto(payload, &claims.sub)?;

    let user = AuthService::new(&state.db).register(params).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            user.into_profile(),
            "User registered successfully",
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<TokenDto>),
        (status = 400, description = "Malformed request body", body = ErrorDto),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = AuthService::new(&state.db)
        .login(&state.tokens, &payload.email, &payload.password, payload.user_type)
        .await?;

    let dto = TokenDto {
        token,
        expires_in: state.tokens.expires_in(),
        user: user.into_profile(),
    };

    Ok((StatusCode::OK, Json(ApiResponse::ok(dto, "Login successful"))))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Authenticated account", body = ApiResponse<ProfileDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers).require(&[]).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            user.into_profile(),
            "User profile retrieved successfully",
        )),
    ))
}

/// Attaches the identity in the bearer token to an existing account found by email.
#[utoipa::path(
    post,
    path = "/api/auth/link-account",
    tag = AUTH_TAG,
    request_body = LinkAccountDto,
    responses(
        (status = 200, description = "Account linked", body = ApiResponse<ProfileDto>),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "No active account with that email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn link_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<LinkAccountDto>,
) -> Result<impl IntoResponse, AppError> {
    let claims = AuthGuard::new(&state, &headers).identity()?;

    let user = AuthService::new(&state.db)
        .link_account(&payload.email, payload.user_type, &claims.sub)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            user.into_profile(),
            "Account linked successfully",
        )),
    ))
}
