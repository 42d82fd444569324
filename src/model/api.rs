use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error envelope returned by every failing endpoint.
///
/// `errors` lists field-level validation failures; `error` carries the underlying detail
/// of an unhandled failure and is only populated in development.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ErrorDto {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldErrorDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            error: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: u64,
}

/// Success envelope wrapping every response payload.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationDto>,
    /// Accepted filter parameters echoed back by listing endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub filters: Option<serde_json::Value>,
    /// Aggregates computed over the full filtered set.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub summary: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            pagination: None,
            filters: None,
            summary: None,
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationDto) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_filters(mut self, filters: serde_json::Value) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_summary(mut self, summary: serde_json::Value) -> Self {
        self.summary = Some(summary);
        self
    }
}

impl ApiResponse<()> {
    /// Envelope without a payload, used by deletes.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: message.into(),
            pagination: None,
            filters: None,
            summary: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub environment: String,
}

/// Document served at `/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct WelcomeDto {
    pub message: String,
    pub version: String,
    pub documentation: String,
    pub health: String,
}

/// Body of the fallback for unknown routes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteNotFoundDto {
    pub success: bool,
    pub message: String,
    pub available_routes: Vec<String>,
}
