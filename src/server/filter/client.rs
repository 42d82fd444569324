use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    model::enums::PlanType,
    server::{
        filter::{Clause, FilterDocument, FilterField, FilterValue},
        util::{query::QueryParams, validate::Validator},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    Username,
    Email,
    City,
    State,
    PlanType,
    IsActive,
    IsVerified,
    CreatedAt,
}

impl FilterField for ClientField {
    fn path(&self) -> &'static str {
        match self {
            ClientField::Username => "username",
            ClientField::Email => "email",
            ClientField::City => "address.city",
            ClientField::State => "address.state",
            ClientField::PlanType => "currentPlan.planType",
            ClientField::IsActive => "isActive",
            ClientField::IsVerified => "isVerified",
            ClientField::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl ClientFilterParams {
    pub fn from_query(params: &QueryParams, v: &mut Validator) -> Self {
        Self {
            username: params.get("username").map(str::to_string),
            email: params.get("email").map(str::to_string),
            city: params.get("city").map(str::to_string),
            state: params.get("state").map(str::to_string),
            plan_type: v.one_of("planType", params.get("planType")),
            is_active: v.boolean("isActive", params.get("isActive")),
            is_verified: v.boolean("isVerified", params.get("isVerified")),
            date_from: v.date("dateFrom", params.get("dateFrom")),
            date_to: v.date("dateTo", params.get("dateTo")),
        }
    }
}

pub fn build_client_filter(
    params: &ClientFilterParams,
    search: Option<&str>,
) -> FilterDocument<ClientField> {
    let mut doc = FilterDocument::new();

    doc.contains(ClientField::Username, params.username.as_deref())
        .contains(ClientField::Email, params.email.as_deref())
        .contains(ClientField::City, params.city.as_deref())
        .contains(ClientField::State, params.state.as_deref())
        .equals(
            ClientField::PlanType,
            params.plan_type.map(|p| FilterValue::text(p.as_str())),
        )
        .equals(ClientField::IsActive, params.is_active.map(FilterValue::Bool))
        .equals(ClientField::IsVerified, params.is_verified.map(FilterValue::Bool))
        .gte(ClientField::CreatedAt, params.date_from.map(FilterValue::Date))
        .lte(ClientField::CreatedAt, params.date_to.map(FilterValue::Date));

    if let Some(term) = search {
        doc.any_of(client_search_clauses(term));
    }

    doc
}

pub fn client_search_clauses(term: &str) -> Vec<Clause<ClientField>> {
    [ClientField::Username, ClientField::Email, ClientField::City]
        .into_iter()
        .map(|field| Clause::Contains {
            field,
            term: term.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_filter_from_query() {
        let mut v = Validator::new();
        let params = ClientFilterParams::from_query(
            &QueryParams::parse("city=york&planType=premium&isActive=true&dateFrom=2024-01-01"),
            &mut v,
        );
        assert!(v.is_valid());

        assert_eq!(
            build_client_filter(&params, Some("john")).to_json(),
            json!({
                "address.city": { "$regex": "york", "$options": "i" },
                "currentPlan.planType": "premium",
                "isActive": true,
                "createdAt": { "$gte": "2024-01-01T00:00:00+00:00" },
                "$or": [
                    { "username": { "$regex": "john", "$options": "i" } },
                    { "email": { "$regex": "john", "$options": "i" } },
                    { "address.city": { "$regex": "john", "$options": "i" } }
                ]
            })
        );
    }

    #[test]
    fn invalid_date_is_reported() {
        let mut v = Validator::new();
        ClientFilterParams::from_query(&QueryParams::parse("dateTo=yesterday"), &mut v);
        assert!(!v.is_valid());
    }
}
