use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
const DEFAULT_PORT: u16 = 5000;

/// Shared secret, issuer and audience used to verify external identity tokens.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,

    /// External identity verification; `None` when `IDENTITY_TOKEN_SECRET` is unset.
    pub identity: Option<IdentityConfig>,

    pub frontend_url: String,
    pub port: u16,
    pub app_env: String,
    pub seed_database: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let identity = optional_var("IDENTITY_TOKEN_SECRET").map(|secret| IdentityConfig {
            secret,
            issuer: optional_var("IDENTITY_TOKEN_ISSUER"),
            audience: optional_var("IDENTITY_TOKEN_AUDIENCE"),
        });

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            jwt_secret: required_var("JWT_SECRET")?,
            jwt_expiry_hours: parsed_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
            identity,
            frontend_url: optional_var("FRONTEND_URL").unwrap_or_else(|| "*".to_string()),
            port: parsed_var("PORT", DEFAULT_PORT)?,
            app_env: optional_var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            seed_database: parsed_var("SEED_DATABASE", false)?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads a variable, treating an empty value as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
