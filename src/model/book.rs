use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_year: i32,
    pub genre: String,
    pub available_copies: u32,
    pub total_copies: u32,
    pub description: String,
}
