use thiserror::Error;

/// Main error type for the prediction service
#[derive(Error, Debug)]
pub enum HoopcastError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Request validation errors
    #[error("{0}")]
    Validation(String),

    // External model process errors
    #[error("{0}")]
    ModelProcess(String),

    #[error("Invalid prediction response format")]
    ModelOutput(String),

    #[error("{0}")]
    ModelReported(String),

    #[error("Prediction timed out after {0}s")]
    ModelTimeout(u64),

    // Explanation service errors
    #[error("Explainer error: {0}")]
    Explainer(String),

    // Lookup errors
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unavailable(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for HoopcastError
pub type Result<T> = std::result::Result<T, HoopcastError>;

/// Reasons a matchup request is rejected before any model is invoked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Home and away teams cannot be the same")]
    SameTeam,

    #[error("Rest days must be between 0-7")]
    RestDaysOutOfRange { rest_days: i64 },

    #[error("Missing prediction data")]
    MissingPredictionData,

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

impl From<ValidationError> for HoopcastError {
    fn from(err: ValidationError) -> Self {
        HoopcastError::Validation(err.to_string())
    }
}
