use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    model::enums::{PartnerType, PlanType, ShootType},
    server::{
        filter::{Clause, FilterDocument, FilterField, FilterValue},
        util::{query::QueryParams, validate::Validator},
    },
};

pub const DEFAULT_SEARCH_RADIUS: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerField {
    Username,
    CompanyName,
    Email,
    City,
    ShootType,
    Specialization,
    PlanType,
    Verified,
    IsActive,
    PartnerType,
    RatingAverage,
    PricePerDay,
    YearsOfExperience,
    CreatedAt,
    /// Price of an active package.
    PackagePrice,
    BlackoutDate,
}

impl FilterField for PartnerField {
    fn path(&self) -> &'static str {
        match self {
            PartnerField::Username => "username",
            PartnerField::CompanyName => "companyName",
            PartnerField::Email => "email",
            PartnerField::City => "locations.city",
            PartnerField::ShootType => "shootType",
            PartnerField::Specialization => "specialization",
            PartnerField::PlanType => "currentPlan.planType",
            PartnerField::Verified => "verified",
            PartnerField::IsActive => "isActive",
            PartnerField::PartnerType => "partnerType",
            PartnerField::RatingAverage => "ratings.average",
            PartnerField::PricePerDay => "pricePerDay",
            PartnerField::YearsOfExperience => "yearsOfExperience",
            PartnerField::CreatedAt => "createdAt",
            PartnerField::PackagePrice => "packages.price",
            PartnerField::BlackoutDate => "availability.blackoutDates.date",
        }
    }
}

/// Accepted partner listing filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerFilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "shootType", skip_serializing_if = "Vec::is_empty")]
    pub shoot_types: Vec<ShootType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_type: Option<PartnerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl PartnerFilterParams {
    pub fn from_query(params: &QueryParams, v: &mut Validator) -> Self {
        let min_rating = v.float("minRating", params.get("minRating"), 0.0);
        if min_rating.is_some_and(|r| r > 5.0) {
            v.push("minRating", "must be between 0 and 5");
        }

        Self {
            username: params.get("username").map(str::to_string),
            company_name: params.get("companyName").map(str::to_string),
            email: params.get("email").map(str::to_string),
            city: params.get("city").map(str::to_string),
            shoot_types: v.all_of("shootType", &params.get_all("shootType")),
            plan_type: v.one_of("planType", params.get("planType")),
            verified: v.boolean("verified", params.get("verified")),
            is_active: v.boolean("isActive", params.get("isActive")),
            partner_type: v.one_of("partnerType", params.get("partnerType")),
            min_rating,
            min_price: v.float("minPrice", params.get("minPrice"), 0.0),
            max_price: v.float("maxPrice", params.get("maxPrice"), 0.0),
            years_of_experience: v.int(
                "yearsOfExperience",
                params.get("yearsOfExperience"),
                0,
                50,
            ),
            date_from: v.date("dateFrom", params.get("dateFrom")),
            date_to: v.date("dateTo", params.get("dateTo")),
        }
    }
}

pub fn build_partner_filter(
    params: &PartnerFilterParams,
    search: Option<&str>,
) -> FilterDocument<PartnerField> {
    let mut doc = FilterDocument::new();

    doc.contains(PartnerField::Username, params.username.as_deref())
        .contains(PartnerField::CompanyName, params.company_name.as_deref())
        .contains(PartnerField::Email, params.email.as_deref())
        .contains(PartnerField::City, params.city.as_deref())
        .is_in(
            PartnerField::ShootType,
            params
                .shoot_types
                .iter()
                .map(|s| FilterValue::text(s.as_str()))
                .collect(),
        )
        .equals(
            PartnerField::PlanType,
            params.plan_type.map(|p| FilterValue::text(p.as_str())),
        )
        .equals(PartnerField::Verified, params.verified.map(FilterValue::Bool))
        .equals(PartnerField::IsActive, params.is_active.map(FilterValue::Bool))
        .equals(
            PartnerField::PartnerType,
            params.partner_type.map(|p| FilterValue::text(p.as_str())),
        )
        .gte(
            PartnerField::RatingAverage,
            params.min_rating.map(FilterValue::Float),
        )
        .gte(PartnerField::PricePerDay, params.min_price.map(FilterValue::Float))
        .lte(PartnerField::PricePerDay, params.max_price.map(FilterValue::Float))
        .gte(
            PartnerField::YearsOfExperience,
            params.years_of_experience.map(FilterValue::Int),
        )
        .gte(PartnerField::CreatedAt, params.date_from.map(FilterValue::Date))
        .lte(PartnerField::CreatedAt, params.date_to.map(FilterValue::Date));

    if let Some(term) = search {
        doc.any_of(partner_search_clauses(term));
    }

    doc
}

pub fn partner_search_clauses(term: &str) -> Vec<Clause<PartnerField>> {
    [
        PartnerField::Username,
        PartnerField::CompanyName,
        PartnerField::Email,
        PartnerField::City,
        PartnerField::ShootType,
        PartnerField::Specialization,
    ]
    .into_iter()
    .map(|field| Clause::Contains {
        field,
        term: term.to_string(),
    })
    .collect()
}

/// Criteria of the public partner search.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerSearchParams {
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub shoot_types: Vec<ShootType>,
    pub budget: Option<f64>,
    /// Kilometres, 1 to 100.
    pub radius: i32,
}

impl PartnerSearchParams {
    pub fn from_query(params: &QueryParams, v: &mut Validator) -> Self {
        Self {
            location: params.get("location").map(str::to_string),
            date: v.naive_date("date", params.get("date")),
            shoot_types: v.all_of("shootType", &params.get_all("shootType")),
            budget: v.float("budget", params.get("budget"), 0.0),
            radius: v
                .int("radius", params.get("radius"), 1, 100)
                .map(|r| r as i32)
                .unwrap_or(DEFAULT_SEARCH_RADIUS),
        }
    }
}

/// Search only ever returns active, verified partners.
pub fn build_partner_search_filter(params: &PartnerSearchParams) -> FilterDocument<PartnerField> {
    let mut doc = FilterDocument::new();

    doc.equals(PartnerField::IsActive, Some(FilterValue::Bool(true)))
        .equals(PartnerField::Verified, Some(FilterValue::Bool(true)))
        .is_in(
            PartnerField::ShootType,
            params
                .shoot_types
                .iter()
                .map(|s| FilterValue::text(s.as_str()))
                .collect(),
        )
        .contains(PartnerField::City, params.location.as_deref())
        .not_eq(PartnerField::BlackoutDate, params.date.map(FilterValue::Day));

    if let Some(budget) = params.budget {
        doc.any_of(
            [PartnerField::PricePerDay, PartnerField::PackagePrice]
                .into_iter()
                .map(|field| Clause::Range {
                    field,
                    gte: None,
                    lte: Some(FilterValue::Float(budget)),
                })
                .collect(),
        );
    }

    doc
}
