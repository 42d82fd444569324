//! Raw query string access for endpoints whose accepted keys depend on the entity.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Multi-valued query parameters in request order.
///
/// Empty values are dropped at parse time, so `?city=&page=2` behaves exactly like
/// `?page=2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.into_owned(), value.trim().to_string()))
            .collect();

        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, accepting both repeated keys and comma separated lists.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .flat_map(|(_, v)| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(parts.uri.query().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_values() {
        let params = QueryParams::parse("city=&page=2&search=%20");
        assert_eq!(params.get("city"), None);
        assert_eq!(params.get("search"), None);
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn collects_repeated_and_comma_separated_values() {
        let params = QueryParams::parse("shootType=wedding&shootType=portrait,event");
        assert_eq!(params.get_all("shootType"), vec!["wedding", "portrait", "event"]);
        assert_eq!(params.get("shootType"), Some("wedding"));
    }

    #[test]
    fn decodes_percent_encoding() {
        let params = QueryParams::parse("search=New%20York&sortBy=ratings.average");
        assert_eq!(params.get("search"), Some("New York"));
        assert_eq!(params.get("sortBy"), Some("ratings.average"));
    }
}
