use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        enums::{PartnerSort, UserType},
        partner::{
            AvailabilityResponseDto, CreatePartnerDto, CreateReviewDto, PartnerDto,
            PartnerSearchDto, ReviewResultDto, SearchCriteriaDto, UpdatePartnerDto,
        },
    },
    server::{
        controller::echo,
        error::AppError,
        filter::partner::{PartnerFilterParams, PartnerSearchParams},
        middleware::auth::{AuthGuard, Permission},
        model::{
            listing::ListQuery,
            partner::{parse_month, CreatePartnerParams, CreateReviewParams, UpdatePartnerParams},
        },
        service::partner::PartnerService,
        state::AppState,
        util::{extract::ApiJson, query::QueryParams, validate::Validator},
    },
};

pub static PARTNER_TAG: &str = "partners";

fn partner_not_found() -> AppError {
    AppError::NotFound("Partner not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/partners",
    tag = PARTNER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("sortBy" = Option<PartnerSort>, Query, description = "Sort field (default: createdAt)"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc (default: desc)"),
        ("search" = Option<String>, Query, description = "Matches username, company name, email or city"),
        ("username" = Option<String>, Query, description = "Username contains"),
        ("companyName" = Option<String>, Query, description = "Company name contains"),
        ("email" = Option<String>, Query, description = "Email contains"),
        ("city" = Option<String>, Query, description = "Service location city contains"),
        ("shootType" = Option<Vec<String>>, Query, description = "Offers any of these shoot types"),
        ("planType" = Option<String>, Query, description = "Plan type"),
        ("verified" = Option<bool>, Query, description = "Verified flag"),
        ("isActive" = Option<bool>, Query, description = "Active flag"),
        ("partnerType" = Option<String>, Query, description = "individual, company or agency"),
        ("minRating" = Option<f64>, Query, description = "Minimum average rating (0 to 5)"),
        ("minPrice" = Option<f64>, Query, description = "Minimum day rate"),
        ("maxPrice" = Option<f64>, Query, description = "Maximum day rate"),
        ("yearsOfExperience" = Option<i64>, Query, description = "Minimum years of experience"),
        ("dateFrom" = Option<String>, Query, description = "Created on or after"),
        ("dateTo" = Option<String>, Query, description = "Created on or before")
    ),
    responses(
        (status = 200, description = "Page of partners", body = ApiResponse<Vec<PartnerDto>>),
        (status = 400, description = "Invalid query parameters", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_partners(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let mut v = Validator::new();
    let query = ListQuery::<PartnerSort>::from_query(&params, &mut v);
    let filters = PartnerFilterParams::from_query(&params, &mut v);
    v.finish()?;

    let page = PartnerService::new(&state.db).list(&filters, &query).await?;
    let pagination = page.pagination();
    let dto = page.map(|partner| partner.into_dto(false));

    Ok((
        StatusCode::OK,
        Json(
            ApiResponse::ok(dto.items, "Partners retrieved successfully")
                .with_pagination(pagination)
                .with_filters(echo(&filters)?),
        ),
    ))
}

/// Active, verified partners available for the criteria, best rated first.
#[utoipa::path(
    get,
    path = "/api/partners/search",
    tag = PARTNER_TAG,
    params(
        ("location" = Option<String>, Query, description = "Service location city contains"),
        ("date" = Option<String>, Query, description = "Event day (YYYY-MM-DD); excludes blacked out partners"),
        ("shootType" = Option<Vec<String>>, Query, description = "Shoot types, repeated or comma separated"),
        ("budget" = Option<f64>, Query, description = "Day rate or package price at most"),
        ("radius" = Option<i32>, Query, description = "Search radius in km, 1 to 100 (default: 50)")
    ),
    responses(
        (status = 200, description = "Matching partners", body = ApiResponse<PartnerSearchDto>),
        (status = 400, description = "Invalid query parameters", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_partners(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let mut v = Validator::new();
    let search = PartnerSearchParams::from_query(&params, &mut v);
    v.finish()?;

    let partners: Vec<PartnerDto> = PartnerService::new(&state.db)
        .search(&search)
        .await?
        .into_iter()
        .map(|partner| partner.into_dto(false))
        .collect();

    let dto = PartnerSearchDto {
        count: partners.len(),
        partners,
        search_criteria: SearchCriteriaDto {
            location: search.location,
            date: search.date,
            shoot_types: search.shoot_types,
            budget: search.budget,
            radius: search.radius,
        },
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(dto, "Search completed successfully")),
    ))
}

/// Public profile. Earnings are included for the partner themselves and for admins.
#[utoipa::path(
    get,
    path = "/api/partners/{id}",
    tag = PARTNER_TAG,
    params(("id" = i32, Path, description = "Partner ID")),
    responses(
        (status = 200, description = "Partner profile", body = ApiResponse<PartnerDto>),
        (status = 401, description = "Bearer token sent but invalid", body = ErrorDto),
        (status = 404, description = "Partner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state, &headers).current().await?;
    let include_earnings = viewer
        .as_ref()
        .is_some_and(|user| user.is_admin() || user.is_account(UserType::Partner, id));

    let partner = PartnerService::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(partner_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            partner.into_dto(include_earnings),
            "Partner retrieved successfully",
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/partners",
    tag = PARTNER_TAG,
    request_body = CreatePartnerDto,
    responses(
        (status = 201, description = "Partner created", body = ApiResponse<PartnerDto>),
        (status = 400, description = "Invalid partner data", body = ErrorDto),
        (status = 409, description = "Email or username already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_partner(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreatePartnerDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CreatePartnerParams::from_dto(payload)?;

    let partner = PartnerService::new(&state.db).create(params).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            partner.into_dto(true),
            "Partner created successfully",
        )),
    ))
}

/// Partial update; `verified` and `isActive` are ignored unless the caller is an admin.
#[utoipa::path(
    put,
    path = "/api/partners/{id}",
    tag = PARTNER_TAG,
    params(("id" = i32, Path, description = "Partner ID")),
    request_body = UpdatePartnerDto,
    responses(
        (status = 200, description = "Partner updated", body = ApiResponse<PartnerDto>),
        (status = 400, description = "Invalid partner data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither the partner nor an admin", body = ErrorDto),
        (status = 404, description = "Partner not found", body = ErrorDto),
        (status = 409, description = "Email or username already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdatePartnerDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers)
        .require(&[Permission::SelfOrAdmin(UserType::Partner, id)])
        .await?;

    let params = UpdatePartnerParams::from_dto(payload, user.is_admin())?;

    let partner = PartnerService::new(&state.db)
        .update(id, params)
        .await?
        .ok_or_else(partner_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            partner.into_dto(true),
            "Partner updated successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/partners/{id}/availability",
    tag = PARTNER_TAG,
    params(
        ("id" = i32, Path, description = "Partner ID"),
        ("date" = Option<String>, Query, description = "Single day (YYYY-MM-DD)"),
        ("month" = Option<String>, Query, description = "Narrow blackout dates to a month (YYYY-MM)")
    ),
    responses(
        (status = 200, description = "Availability for the day or the schedule", body = ApiResponse<AvailabilityResponseDto>),
        (status = 400, description = "Invalid date or month", body = ErrorDto),
        (status = 404, description = "Partner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    params: QueryParams,
) -> Result<impl IntoResponse, AppError> {
    let mut v = Validator::new();
    let date = v.naive_date("date", params.get("date"));
    let month = params.get("month").and_then(|raw| {
        let parsed = parse_month(raw);
        if parsed.is_none() {
            v.push("month", "must be a month in YYYY-MM format");
        }
        parsed
    });
    v.finish()?;

    let availability = PartnerService::new(&state.db)
        .availability(id, date, month)
        .await?
        .ok_or_else(partner_not_found)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            availability,
            "Availability retrieved successfully",
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/partners/{id}/reviews",
    tag = PARTNER_TAG,
    params(("id" = i32, Path, description = "Partner ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review stored and ratings recomputed", body = ApiResponse<ReviewResultDto>),
        (status = 400, description = "Invalid review or order mismatch", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a client", body = ErrorDto),
        (status = 404, description = "Partner not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn add_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &headers)
        .require(&[Permission::Role(UserType::Client)])
        .await?;

    let params = CreateReviewParams::from_dto(payload, id, user.id())?;

    let (review, ratings) = PartnerService::new(&state.db)
        .add_review(params)
        .await?
        .ok_or_else(partner_not_found)?;

    let dto = ReviewResultDto {
        review: review.into_dto(),
        ratings: ratings.into_dto(),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(dto, "Review added successfully")),
    ))
}
