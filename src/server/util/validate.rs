//! Field-by-field validation that collects every failure before reporting.

use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::server::error::{validation::FieldError, AppError};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("invalid phone regex"));

/// Accumulates field errors; `finish` turns them into a single 400 response.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Parses an integer within `[min, max]`.
    pub fn int(&mut self, field: &str, raw: Option<&str>, min: i64, max: i64) -> Option<i64> {
        let raw = raw?;
        match raw.parse::<i64>() {
            Ok(value) if (min..=max).contains(&value) => Some(value),
            _ => {
                self.push(field, format!("must be an integer between {} and {}", min, max));
                None
            }
        }
    }

    /// Parses a finite number no smaller than `min`.
    pub fn float(&mut self, field: &str, raw: Option<&str>, min: f64) -> Option<f64> {
        let raw = raw?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= min => Some(value),
            _ => {
                self.push(field, format!("must be a number >= {}", min));
                None
            }
        }
    }

    pub fn boolean(&mut self, field: &str, raw: Option<&str>) -> Option<bool> {
        match raw? {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                self.push(field, "must be true or false");
                None
            }
        }
    }

    /// Parses one of the wire names of a string-backed enum.
    pub fn one_of<T>(&mut self, field: &str, raw: Option<&str>) -> Option<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match raw?.parse::<T>() {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e.to_string());
                None
            }
        }
    }

    /// Parses every value, reporting the first bad one.
    pub fn all_of<T>(&mut self, field: &str, raw: &[&str]) -> Vec<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let mut values = Vec::with_capacity(raw.len());
        for value in raw {
            match value.parse::<T>() {
                Ok(parsed) => values.push(parsed),
                Err(e) => {
                    self.push(field, e.to_string());
                    return Vec::new();
                }
            }
        }
        values
    }

    /// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
    pub fn date(&mut self, field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
        let raw = raw?;
        match parse_datetime(raw) {
            Some(value) => Some(value),
            None => {
                self.push(field, "must be a valid ISO 8601 date");
                None
            }
        }
    }

    pub fn naive_date(&mut self, field: &str, raw: Option<&str>) -> Option<NaiveDate> {
        self.date(field, raw).map(|value| value.date_naive())
    }

    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.trim().chars().count();
        if len < min || len > max {
            self.push(field, format!("must be between {} and {} characters", min, max));
        }
    }

    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.push(field, format!("must be at most {} characters", max));
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !EMAIL_PATTERN.is_match(value.trim()) {
            self.push(field, "must be a valid email address");
        }
    }

    pub fn phone(&mut self, field: &str, value: &str) {
        if !PHONE_PATTERN.is_match(value.trim()) {
            self.push(field, "must be a valid phone number");
        }
    }

    pub fn range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if value.is_some_and(|v| !v.is_finite() || v < min || v > max) {
            self.push(field, format!("must be between {} and {}", min, max));
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
