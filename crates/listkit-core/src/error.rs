use thiserror::Error;

/// Validation errors raised while constructing domain records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("invalid screen '{value}', expected one of contacts, instruments, sent, received")]
    InvalidScreen { value: String },
}

/// Errors raised while assembling collaborators from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API base URL configured; set LISTKIT_API_BASE_URL or use mock mode")]
    MissingBaseUrl,

    #[error("invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Top-level error type for core operations outside the load path.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("delivery context error: {0}")]
    Delivery(#[from] std::io::Error),
}
