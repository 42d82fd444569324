use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    model::enums::UserType,
    server::{router::router, state::AppState},
};
use test_utils::{builder::TestBuilder, factory};

mod client;
mod listing;
mod misc;
mod order;

struct TestApp {
    state: AppState,
}

impl TestApp {
    fn new(db: &DatabaseConnection) -> Self {
        Self {
            state: AppState::for_tests(db.clone()),
        }
    }

    fn token(&self, id: i32, user_type: UserType) -> String {
        self.state.tokens.issue(id, user_type).unwrap()
    }

    fn router(&self) -> Router {
        router().with_state(self.state.clone())
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self
            .router()
            .oneshot(request(method, uri, token, body))
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn field_errors(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
