use axum::{
    http::{header::CACHE_CONTROL, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        book::BookDto,
        enums::BookSort,
    },
    server::{
        controller::echo,
        error::AppError,
        model::{
            book::{select_books, BookFilterParams},
            listing::{paginate_vec, ListQuery},
        },
        util::{query::QueryParams, validate::Validator},
    },
};

pub static BOOK_TAG: &str = "books";

#[utoipa::path(
    get,
    path = "/api/books",
    tag = BOOK_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("sortBy" = Option<BookSort>, Query, description = "Sort field; catalogue order when absent"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc (default: desc)"),
        ("search" = Option<String>, Query, description = "Matches title, author or description"),
        ("genre" = Option<String>, Query, description = "Genre contains"),
        ("author" = Option<String>, Query, description = "Author contains"),
        ("available" = Option<bool>, Query, description = "Only titles with copies available when true")
    ),
    responses(
        (status = 200, description = "Page of books", body = ApiResponse<Vec<BookDto>>),
        (status = 400, description = "Invalid query parameters", body = ErrorDto)
    ),
)]
pub async fn list_books(params: QueryParams) -> Result<impl IntoResponse, AppError> {
    let mut v = Validator::new();
    let query = ListQuery::<BookSort>::from_query(&params, &mut v);
    let filters = BookFilterParams::from_query(&params, &mut v);
    v.finish()?;

    let page = paginate_vec(select_books(&filters, &query), &query);
    let pagination = page.pagination();

    Ok((
        StatusCode::OK,
        [(CACHE_CONTROL, "no-cache, no-store, must-revalidate")],
        Json(
            ApiResponse::ok(page.items, "Books retrieved successfully")
                .with_pagination(pagination)
                .with_filters(echo(&filters)?),
        ),
    ))
}

#[utoipa::path(
    post,
    path = "/api/books",
    tag = BOOK_TAG,
    responses(
        (status = 501, description = "The catalogue is read-only", body = ErrorDto)
    ),
)]
pub async fn create_book() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(ErrorDto::new("Method not implemented")),
    )
}
