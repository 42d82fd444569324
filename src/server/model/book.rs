//! Static book catalogue with in-memory filtering, search and sort.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    model::{
        book::BookDto,
        enums::{BookSort, SortOrder},
    },
    server::{
        model::listing::ListQuery,
        util::{query::QueryParams, validate::Validator},
    },
};

#[allow(clippy::too_many_arguments)]
fn book(
    id: u32,
    title: &str,
    author: &str,
    isbn: &str,
    published_year: i32,
    genre: &str,
    copies: (u32, u32),
    description: &str,
) -> BookDto {
    BookDto {
        id,
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        published_year,
        genre: genre.to_string(),
        available_copies: copies.0,
        total_copies: copies.1,
        description: description.to_string(),
    }
}

/// The five demonstration titles served by `GET /api/books`.
pub fn catalogue() -> Vec<BookDto> {
    vec![
        book(
            1,
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            "978-0-7432-7356-5",
            1925,
            "Fiction",
            (3, 5),
            "A classic American novel set in the Jazz Age",
        ),
        book(
            2,
            "To Kill a Mockingbird",
            "Harper Lee",
            "978-0-06-112008-4",
            1960,
            "Fiction",
            (2, 4),
            "A gripping tale of racial injustice and childhood innocence",
        ),
        book(
            3,
            "1984",
            "George Orwell",
            "978-0-452-28423-4",
            1949,
            "Dystopian Fiction",
            (1, 3),
            "A dystopian social science fiction novel",
        ),
        book(
            4,
            "Pride and Prejudice",
            "Jane Austen",
            "978-0-14-143951-8",
            1813,
            "Romance",
            (4, 6),
            "A romantic novel of manners",
        ),
        book(
            5,
            "The Catcher in the Rye",
            "J.D. Salinger",
            "978-0-316-76948-0",
            1951,
            "Fiction",
            (0, 2),
            "A controversial novel about teenage rebellion",
        ),
    ]
}

/// Book filters; `available` only narrows when it is `true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookFilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl BookFilterParams {
    pub fn from_query(params: &QueryParams, v: &mut Validator) -> Self {
        Self {
            genre: params.get("genre").map(str::to_string),
            author: params.get("author").map(str::to_string),
            available: v.boolean("available", params.get("available")),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn compare(a: &BookDto, b: &BookDto, field: BookSort) -> Ordering {
    match field {
        BookSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        BookSort::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        BookSort::PublishedYear => a.published_year.cmp(&b.published_year),
    }
    .then(a.id.cmp(&b.id))
}

/// Filters, searches and sorts the catalogue. Without `sortBy` the catalogue order is kept.
pub fn select_books(filters: &BookFilterParams, query: &ListQuery<BookSort>) -> Vec<BookDto> {
    let mut books: Vec<BookDto> = catalogue()
        .into_iter()
        .filter(|b| {
            filters
                .genre
                .as_deref()
                .is_none_or(|g| contains_ignore_case(&b.genre, g))
        })
        .filter(|b| {
            filters
                .author
                .as_deref()
                .is_none_or(|a| contains_ignore_case(&b.author, a))
        })
        .filter(|b| filters.available != Some(true) || b.available_copies > 0)
        .filter(|b| {
            query.search.as_deref().is_none_or(|term| {
                contains_ignore_case(&b.title, term)
                    || contains_ignore_case(&b.author, term)
                    || contains_ignore_case(&b.genre, term)
            })
        })
        .collect();

    if let Some(field) = query.sort_by {
        books.sort_by(|a, b| match query.sort_order {
            SortOrder::Asc => compare(a, b, field),
            SortOrder::Desc => compare(b, a, field),
        });
    }

    books
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(books: &[BookDto]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn keeps_catalogue_order_without_sort() {
        let books = select_books(&BookFilterParams::default(), &ListQuery::default());
        assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn filters_by_genre_and_availability() {
        let filters = BookFilterParams {
            genre: Some("fiction".to_string()),
            available: Some(true),
            ..Default::default()
        };
        let books = select_books(&filters, &ListQuery::default());
        assert_eq!(
            titles(&books),
            vec!["The Great Gatsby", "To Kill a Mockingbird", "1984"]
        );
    }

    #[test]
    fn available_false_does_not_narrow() {
        let filters = BookFilterParams {
            available: Some(false),
            ..Default::default()
        };
        assert_eq!(select_books(&filters, &ListQuery::default()).len(), 5);
    }

    #[test]
    fn sorts_by_published_year() {
        let query = ListQuery {
            sort_by: Some(BookSort::PublishedYear),
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let books = select_books(&BookFilterParams::default(), &query);
        assert_eq!(books[0].title, "Pride and Prejudice");
        assert_eq!(books[4].title, "To Kill a Mockingbird");
    }

    #[test]
    fn searches_title_and_author() {
        let query = ListQuery {
            search: Some("orwell".to_string()),
            ..Default::default()
        };
        assert_eq!(
            titles(&select_books(&BookFilterParams::default(), &query)),
            vec!["1984"]
        );
    }
}
