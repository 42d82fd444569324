use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{admin, auth, book, client, health, order, partner},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixisphere API",
        description = "Photography marketplace connecting clients with photographers and studios"
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and identity linking"),
        (name = "clients", description = "Client accounts, favourites and order history"),
        (name = "partners", description = "Partner profiles, search, availability and reviews"),
        (name = "orders", description = "Order placement, lifecycle and analytics"),
        (name = "admins", description = "Admin dashboard, analytics and system health"),
        (name = "books", description = "Static demonstration catalogue"),
        (name = "health", description = "Liveness and welcome document")
    )
)]
struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Every API route, the Swagger UI at `/api/docs` and a JSON fallback for unknown paths.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::welcome))
        .routes(routes!(health::health))
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::me))
        .routes(routes!(auth::link_account))
        .routes(routes!(client::list_clients, client::create_client))
        .routes(routes!(
            client::get_client,
            client::update_client,
            client::delete_client
        ))
        .routes(routes!(client::get_client_orders))
        .routes(routes!(client::add_favourite))
        .routes(routes!(client::remove_favourite))
        .routes(routes!(partner::list_partners, partner::create_partner))
        .routes(routes!(partner::search_partners))
        .routes(routes!(partner::get_partner, partner::update_partner))
        .routes(routes!(partner::get_availability))
        .routes(routes!(partner::add_review))
        .routes(routes!(order::list_orders, order::create_order))
        .routes(routes!(order::get_order, order::update_order))
        .routes(routes!(order::update_order_status))
        .routes(routes!(order::order_analytics))
        .routes(routes!(admin::get_dashboard))
        .routes(routes!(admin::get_analytics))
        .routes(routes!(admin::get_system_health))
        .routes(routes!(book::list_books, book::create_book))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .fallback(health::not_found)
}
