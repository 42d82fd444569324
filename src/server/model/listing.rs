//! Page, limit, sort and search handling shared by every listing endpoint.

use std::str::FromStr;

use crate::{
    model::{api::PaginationDto, enums::SortOrder},
    server::util::{query::QueryParams, validate::Validator},
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Validated listing controls. `sort_by` is `None` when the request did not pick a field,
/// leaving the endpoint's default ordering in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<S> {
    pub page: u64,
    pub limit: u64,
    pub sort_by: Option<S>,
    pub sort_order: SortOrder,
    pub search: Option<String>,
}

impl<S> ListQuery<S>
where
    S: FromStr,
    S::Err: std::fmt::Display,
{
    pub fn from_query(params: &QueryParams, v: &mut Validator) -> Self {
        Self {
            page: v
                .int("page", params.get("page"), 1, i64::MAX)
                .map(|p| p as u64)
                .unwrap_or(DEFAULT_PAGE),
            limit: v
                .int("limit", params.get("limit"), 1, MAX_LIMIT as i64)
                .map(|l| l as u64)
                .unwrap_or(DEFAULT_LIMIT),
            sort_by: v.one_of("sortBy", params.get("sortBy")),
            sort_order: v
                .one_of("sortOrder", params.get("sortOrder"))
                .unwrap_or_default(),
            search: params.get("search").map(str::to_string),
        }
    }
}

impl<S> ListQuery<S> {
    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Whether this page starts at or after the last of `total` rows.
    pub fn is_past_end(&self, total: u64) -> bool {
        self.offset() >= total
    }
}

impl<S> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: None,
            sort_order: SortOrder::default(),
            search: None,
        }
    }
}

/// One page of results together with the size of the full filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.limit.max(1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn pagination(&self) -> PaginationDto {
        let total_pages = self.total_pages();
        PaginationDto {
            current_page: self.page,
            total_pages,
            total_count: self.total,
            has_next_page: self.page < total_pages,
            has_prev_page: self.page > 1,
            limit: self.limit,
        }
    }
}

/// Slices an in-memory collection into the requested page.
pub fn paginate_vec<T, S>(items: Vec<T>, query: &ListQuery<S>) -> Page<T> {
    let total = items.len() as u64;
    let items = if query.is_past_end(total) {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect()
    };

    Page {
        items,
        total,
        page: query.page,
        limit: query.limit,
    }
}
