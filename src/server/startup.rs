use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::seed::SeedService,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Replaces all data with the sample set when `SEED_DATABASE` is enabled.
pub async fn seed_if_requested(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    if !config.seed_database {
        return Ok(());
    }

    SeedService::new(db).run().await?;

    tracing::info!("Sample accounts: admin@pixisphere.com / admin123, john@example.com / password123");

    Ok(())
}

/// CORS policy for the configured frontend origin.
///
/// `*` allows any origin without credentials; a concrete origin also allows credentials.
pub fn setup_cors(config: &Config) -> Result<CorsLayer, AppError> {
    if config.frontend_url == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origin = HeaderValue::from_str(&config.frontend_url).map_err(|e| {
        ConfigError::InvalidEnvVar {
            name: "FRONTEND_URL".to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true))
}
