//! Pure translation of typed query parameters into filter documents.
//!
//! A [`FilterDocument`] is an ordered list of clauses over an entity-specific field enum.
//! Absent parameters contribute nothing, `gte`/`lte` bounds on the same field merge into
//! one range, and free-text search becomes a single `AnyOf` clause. The data layer turns
//! documents into SeaORM conditions; [`FilterDocument::to_json`] renders the equivalent
//! MongoDB-style document for logging and tests.

pub mod client;
pub mod order;
pub mod partner;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Map, Value};

/// A filterable field with its dotted document path.
pub trait FilterField: Copy + PartialEq + std::fmt::Debug {
    fn path(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(DateTime<Utc>),
    Day(NaiveDate),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    fn to_json(&self) -> Value {
        match self {
            FilterValue::Text(v) => json!(v),
            FilterValue::Bool(v) => json!(v),
            FilterValue::Int(v) => json!(v),
            FilterValue::Float(v) => json!(v),
            FilterValue::Date(v) => json!(v.to_rfc3339()),
            FilterValue::Day(v) => json!(v.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause<F> {
    /// Case-insensitive substring match.
    Contains { field: F, term: String },
    Eq { field: F, value: FilterValue },
    In { field: F, values: Vec<FilterValue> },
    /// For collection paths: no element equals the value.
    NotEq { field: F, value: FilterValue },
    Range {
        field: F,
        gte: Option<FilterValue>,
        lte: Option<FilterValue>,
    },
    AnyOf(Vec<Clause<F>>),
}

impl<F: FilterField> Clause<F> {
    fn to_json(&self) -> (String, Value) {
        match self {
            Clause::Contains { field, term } => (
                field.path().to_string(),
                json!({ "$regex": regex::escape(term), "$options": "i" }),
            ),
            Clause::Eq { field, value } => (field.path().to_string(), value.to_json()),
            Clause::In { field, values } => (
                field.path().to_string(),
                json!({ "$in": values.iter().map(FilterValue::to_json).collect::<Vec<_>>() }),
            ),
            Clause::NotEq { field, value } => {
                (field.path().to_string(), json!({ "$ne": value.to_json() }))
            }
            Clause::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("$gte".to_string(), gte.to_json());
                }
                if let Some(lte) = lte {
                    bounds.insert("$lte".to_string(), lte.to_json());
                }
                (field.path().to_string(), Value::Object(bounds))
            }
            Clause::AnyOf(clauses) => (
                "$or".to_string(),
                Value::Array(
                    clauses
                        .iter()
                        .map(|clause| {
                            let (key, value) = clause.to_json();
                            single(key, value)
                        })
                        .collect(),
                ),
            ),
        }
    }
}

fn single(key: String, value: Value) -> Value {
    let mut object = Map::new();
    object.insert(key, value);
    Value::Object(object)
}

/// Conjunction of clauses over the fields `F`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDocument<F> {
    clauses: Vec<Clause<F>>,
}

impl<F: FilterField> Default for FilterDocument<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FilterField> FilterDocument<F> {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    pub fn clauses(&self) -> &[Clause<F>] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn push(&mut self, clause: Clause<F>) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    pub fn contains(&mut self, field: F, term: Option<&str>) -> &mut Self {
        if let Some(term) = term {
            self.clauses.push(Clause::Contains {
                field,
                term: term.to_string(),
            });
        }
        self
    }

    pub fn equals(&mut self, field: F, value: Option<FilterValue>) -> &mut Self {
        if let Some(value) = value {
            self.clauses.push(Clause::Eq { field, value });
        }
        self
    }

    pub fn is_in(&mut self, field: F, values: Vec<FilterValue>) -> &mut Self {
        if !values.is_empty() {
            self.clauses.push(Clause::In { field, values });
        }
        self
    }

    /// Equality for one value, membership for several.
    pub fn one_or_many(&mut self, field: F, mut values: Vec<FilterValue>) -> &mut Self {
        match values.len() {
            0 => self,
            1 => self.equals(field, values.pop()),
            _ => self.is_in(field, values),
        }
    }

    pub fn not_eq(&mut self, field: F, value: Option<FilterValue>) -> &mut Self {
        if let Some(value) = value {
            self.clauses.push(Clause::NotEq { field, value });
        }
        self
    }

    pub fn gte(&mut self, field: F, value: Option<FilterValue>) -> &mut Self {
        if let Some(value) = value {
            self.set_bound(field, value, false);
        }
        self
    }

    pub fn lte(&mut self, field: F, value: Option<FilterValue>) -> &mut Self {
        if let Some(value) = value {
            self.set_bound(field, value, true);
        }
        self
    }

    pub fn any_of(&mut self, clauses: Vec<Clause<F>>) -> &mut Self {
        if !clauses.is_empty() {
            self.clauses.push(Clause::AnyOf(clauses));
        }
        self
    }

    /// Sets one side of the range on `field`, reusing an existing range clause.
    fn set_bound(&mut self, field: F, value: FilterValue, upper: bool) {
        let existing = self.clauses.iter_mut().find_map(|clause| match clause {
            Clause::Range { field: f, gte, lte } if *f == field => Some((gte, lte)),
            _ => None,
        });

        if let Some((gte, lte)) = existing {
            if upper {
                *lte = Some(value);
            } else {
                *gte = Some(value);
            }
            return;
        }

        let (gte, lte) = if upper {
            (None, Some(value))
        } else {
            (Some(value), None)
        };
        self.clauses.push(Clause::Range { field, gte, lte });
    }

    /// MongoDB-style rendering. Several `AnyOf` clauses are combined under `$and`.
    pub fn to_json(&self) -> Value {
        let mut document = Map::new();
        let mut alternatives = Vec::new();

        for clause in &self.clauses {
            let (key, value) = clause.to_json();
            if matches!(clause, Clause::AnyOf(_)) {
                alternatives.push(single(key, value));
            } else {
                document.insert(key, value);
            }
        }

        match alternatives.len() {
            0 => {}
            1 => {
                if let Some(Value::Object(or)) = alternatives.pop() {
                    document.extend(or);
                }
            }
            _ => {
                document.insert("$and".to_string(), Value::Array(alternatives));
            }
        }

        Value::Object(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum TestField {
        Name,
        Price,
        Tag,
    }

    impl FilterField for TestField {
        fn path(&self) -> &'static str {
            match self {
                TestField::Name => "name",
                TestField::Price => "price",
                TestField::Tag => "tags",
            }
        }
    }

    #[test]
    fn absent_values_add_no_clauses() {
        let mut doc = FilterDocument::<TestField>::new();
        doc.contains(TestField::Name, None)
            .equals(TestField::Tag, None)
            .gte(TestField::Price, None)
            .one_or_many(TestField::Tag, vec![])
            .any_of(vec![]);

        assert!(doc.is_empty());
        assert_eq!(doc.to_json(), json!({}));
    }

    #[test]
    fn equals_on_owned_document() {
        let mut doc = FilterDocument::new();
        doc.equals(TestField::Tag, Some(FilterValue::Bool(true)));
        let mut other = doc.clone();
        other.equals(TestField::Name, Some(FilterValue::text("x")));

        assert_eq!(doc.to_json(), json!({ "tags": true }));
        assert_eq!(other.to_json(), json!({ "tags": true, "name": "x" }));
        assert_ne!(doc, other);
    }

    #[test]
    fn range_bounds_merge() {
        let mut doc = FilterDocument::new();
        doc.gte(TestField::Price, Some(FilterValue::Float(100.0)))
            .lte(TestField::Price, Some(FilterValue::Float(500.0)));

        assert_eq!(doc.clauses().len(), 1);
        assert_eq!(doc.to_json(), json!({ "price": { "$gte": 100.0, "$lte": 500.0 } }));
    }

    #[test]
    fn one_or_many_picks_eq_or_in() {
        let mut one = FilterDocument::new();
        one.one_or_many(TestField::Tag, vec![FilterValue::text("a")]);
        assert_eq!(one.to_json(), json!({ "tags": "a" }));

        let mut many = FilterDocument::new();
        many.one_or_many(
            TestField::Tag,
            vec![FilterValue::text("a"), FilterValue::text("b")],
        );
        assert_eq!(many.to_json(), json!({ "tags": { "$in": ["a", "b"] } }));
    }

    #[test]
    fn contains_escapes_regex_metacharacters() {
        let mut doc = FilterDocument::new();
        doc.contains(TestField::Name, Some("a.b"));
        assert_eq!(
            doc.to_json(),
            json!({ "name": { "$regex": "a\\.b", "$options": "i" } })
        );
    }

    #[test]
    fn multiple_alternatives_nest_under_and() {
        let mut doc = FilterDocument::new();
        doc.any_of(vec![Clause::Eq {
            field: TestField::Name,
            value: FilterValue::text("x"),
        }])
        .any_of(vec![Clause::Eq {
            field: TestField::Tag,
            value: FilterValue::Bool(true),
        }]);

        assert_eq!(
            doc.to_json(),
            json!({ "$and": [
                { "$or": [{ "name": "x" }] },
                { "$or": [{ "tags": true }] }
            ] })
        );
    }
}
