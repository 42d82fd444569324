use thiserror::Error;

/// Startup failures while reading the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `DATABASE_URL` or `JWT_SECRET` is absent or blank. See `.env.example`.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A numeric, boolean or origin variable did not parse.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },
}
