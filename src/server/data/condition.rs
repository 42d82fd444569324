//! Translation of filter documents into SeaORM conditions.
//!
//! Own columns are compared directly. Fields stored in partner child tables become
//! `partner.id IN (SELECT partner_id FROM child WHERE ...)`; a `NotEq` on a child field
//! becomes `NOT IN`, so "no blackout row on this date" excludes any partner that has one.

use sea_orm::{
    sea_query::{self, extension::sqlite::SqliteBinOper, Expr},
    ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, QueryTrait, Value,
};

use crate::server::filter::{
    client::ClientField, order::OrderField, partner::PartnerField, Clause, FilterDocument,
    FilterField, FilterValue,
};

/// Predicate applied to a single field.
#[derive(Debug, Clone, Copy)]
pub enum Predicate<'a> {
    Contains(&'a str),
    Eq(&'a FilterValue),
    In(&'a [FilterValue]),
    NotEq(&'a FilterValue),
    Range(Option<&'a FilterValue>, Option<&'a FilterValue>),
}

/// A filter field that knows where it lives in the schema.
pub trait FieldCondition: FilterField {
    fn condition(&self, predicate: Predicate<'_>) -> Condition;
}

/// Conjunction of every clause in the document.
pub fn to_condition<F: FieldCondition>(doc: &FilterDocument<F>) -> Condition {
    doc.clauses()
        .iter()
        .fold(Condition::all(), |cond, clause| cond.add(clause_condition(clause)))
}

fn clause_condition<F: FieldCondition>(clause: &Clause<F>) -> Condition {
    match clause {
        Clause::Contains { field, term } => field.condition(Predicate::Contains(term)),
        Clause::Eq { field, value } => field.condition(Predicate::Eq(value)),
        Clause::In { field, values } => field.condition(Predicate::In(values)),
        Clause::NotEq { field, value } => field.condition(Predicate::NotEq(value)),
        Clause::Range { field, gte, lte } => {
            field.condition(Predicate::Range(gte.as_ref(), lte.as_ref()))
        }
        Clause::AnyOf(clauses) => clauses
            .iter()
            .fold(Condition::any(), |cond, clause| cond.add(clause_condition(clause))),
    }
}

fn value(v: &FilterValue) -> Value {
    match v {
        FilterValue::Text(s) => s.clone().into(),
        FilterValue::Bool(b) => (*b).into(),
        FilterValue::Int(i) => (*i).into(),
        FilterValue::Float(f) => (*f).into(),
        FilterValue::Date(d) => (*d).into(),
        FilterValue::Day(d) => (*d).into(),
    }
}

/// `*term*` GLOB pattern matching the term in any letter case.
///
/// Each cased character becomes a class of its case forms (`é` gives `[éÉ]`), so folding
/// covers non-ASCII letters where SQLite LIKE would only fold ASCII. GLOB metacharacters
/// in the term are matched literally.
fn glob_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() * 4 + 2);
    pattern.push('*');
    for c in term.chars() {
        let mut forms = vec![c];
        for variant in [single(c.to_lowercase()), single(c.to_uppercase())]
            .into_iter()
            .flatten()
        {
            if !forms.contains(&variant) {
                forms.push(variant);
            }
        }

        match c {
            '*' | '?' | '[' if forms.len() == 1 => {
                pattern.push('[');
                pattern.push(c);
                pattern.push(']');
            }
            _ if forms.len() == 1 => pattern.push(c),
            _ => {
                pattern.push('[');
                pattern.extend(forms);
                pattern.push(']');
            }
        }
    }
    pattern.push('*');
    pattern
}

fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Applies a predicate to a column of the queried table.
pub fn column<C: ColumnTrait>(col: C, predicate: Predicate<'_>) -> Condition {
    match predicate {
        Predicate::Contains(term) => Condition::all().add(sea_query::ExprTrait::binary(
            Expr::col(col.as_column_ref()),
            SqliteBinOper::Glob,
            glob_pattern(term),
        )),
        Predicate::Eq(v) => Condition::all().add(col.eq(value(v))),
        Predicate::In(values) => Condition::all().add(col.is_in(values.iter().map(value))),
        Predicate::NotEq(v) => Condition::any().add(col.ne(value(v))).add(col.is_null()),
        Predicate::Range(gte, lte) => Condition::all()
            .add_option(gte.map(|v| col.gte(value(v))))
            .add_option(lte.map(|v| col.lte(value(v)))),
    }
}

/// Applies a predicate to a child table row linked through `foreign_key`.
///
/// `scope` narrows which child rows count, for example only active packages.
pub fn child<E, P>(
    parent_id: P,
    foreign_key: E::Column,
    col: E::Column,
    scope: Condition,
    predicate: Predicate<'_>,
) -> Condition
where
    E: EntityTrait,
    P: ColumnTrait,
{
    let (inner, negate) = match predicate {
        Predicate::NotEq(v) => (Predicate::Eq(v), true),
        other => (other, false),
    };

    let subquery = E::find()
        .select_only()
        .column(foreign_key)
        .filter(column(col, inner))
        .filter(scope)
        .into_query();

    let expr = if negate {
        parent_id.not_in_subquery(subquery)
    } else {
        parent_id.in_subquery(subquery)
    };
    Condition::all().add(expr)
}

impl FieldCondition for PartnerField {
    fn condition(&self, predicate: Predicate<'_>) -> Condition {
        use entity::{
            partner::Column, partner_blackout_date as blackout, partner_location as location,
            partner_package as package, partner_shoot_type as shoot_type,
            partner_specialization as specialization,
        };

        match self {
            PartnerField::Username => column(Column::Username, predicate),
            PartnerField::CompanyName => column(Column::CompanyName, predicate),
            PartnerField::Email => column(Column::Email, predicate),
            PartnerField::PlanType => column(Column::PlanType, predicate),
            PartnerField::Verified => column(Column::Verified, predicate),
            PartnerField::IsActive => column(Column::IsActive, predicate),
            PartnerField::PartnerType => column(Column::PartnerType, predicate),
            PartnerField::RatingAverage => column(Column::RatingAverage, predicate),
            PartnerField::PricePerDay => column(Column::PricePerDay, predicate),
            PartnerField::YearsOfExperience => column(Column::YearsOfExperience, predicate),
            PartnerField::CreatedAt => column(Column::CreatedAt, predicate),
            PartnerField::City => child::<location::Entity, _>(
                Column::Id,
                location::Column::PartnerId,
                location::Column::City,
                Condition::all(),
                predicate,
            ),
            PartnerField::ShootType => child::<shoot_type::Entity, _>(
                Column::Id,
                shoot_type::Column::PartnerId,
                shoot_type::Column::ShootType,
                Condition::all(),
                predicate,
            ),
            PartnerField::Specialization => child::<specialization::Entity, _>(
                Column::Id,
                specialization::Column::PartnerId,
                specialization::Column::Name,
                Condition::all(),
                predicate,
            ),
            PartnerField::PackagePrice => child::<package::Entity, _>(
                Column::Id,
                package::Column::PartnerId,
                package::Column::Price,
                Condition::all().add(package::Column::IsActive.eq(true)),
                predicate,
            ),
            PartnerField::BlackoutDate => child::<blackout::Entity, _>(
                Column::Id,
                blackout::Column::PartnerId,
                blackout::Column::Date,
                Condition::all(),
                predicate,
            ),
        }
    }
}

impl FieldCondition for ClientField {
    fn condition(&self, predicate: Predicate<'_>) -> Condition {
        use entity::client::Column;

        match self {
            ClientField::Username => column(Column::Username, predicate),
            ClientField::Email => column(Column::Email, predicate),
            ClientField::City => column(Column::City, predicate),
            ClientField::State => column(Column::State, predicate),
            ClientField::PlanType => column(Column::PlanType, predicate),
            ClientField::IsActive => column(Column::IsActive, predicate),
            ClientField::IsVerified => column(Column::IsVerified, predicate),
            ClientField::CreatedAt => column(Column::CreatedAt, predicate),
        }
    }
}

impl FieldCondition for OrderField {
    fn condition(&self, predicate: Predicate<'_>) -> Condition {
        use entity::order::Column;

        match self {
            OrderField::ClientId => column(Column::ClientId, predicate),
            OrderField::PartnerId => column(Column::PartnerId, predicate),
            OrderField::Status => column(Column::Status, predicate),
            OrderField::OrderName => column(Column::OrderName, predicate),
            OrderField::OrderCode => column(Column::OrderCode, predicate),
            OrderField::City => column(Column::City, predicate),
            OrderField::Venue => column(Column::Venue, predicate),
            OrderField::EventName => column(Column::EventName, predicate),
            OrderField::EventType => column(Column::EventType, predicate),
            OrderField::TotalAmount => column(Column::TotalAmount, predicate),
            OrderField::PaymentStatus => column(Column::PaymentStatus, predicate),
            OrderField::EventDateTime => column(Column::EventDateTime, predicate),
            OrderField::BookingDateTime => column(Column::BookingDateTime, predicate),
            OrderField::Progress => column(Column::ProgressPercentage, predicate),
            OrderField::CurrentStage => column(Column::CurrentStage, predicate),
            OrderField::CreatedAt => column(Column::CreatedAt, predicate),
        }
    }
}
