mod model;
mod server;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    server::error::expose_error_details(config.is_development());

    let db = startup::connect_to_database(&config).await?;
    startup::seed_if_requested(&db, &config).await?;
    let cors = startup::setup_cors(&config)?;

    let app = router::router()
        .with_state(AppState::new(db, &config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("Server is running on port {}", config.port);
    tracing::info!("Environment: {}", config.app_env);
    if config.identity.is_none() {
        tracing::warn!("IDENTITY_TOKEN_SECRET is not set; external identity tokens are rejected");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
