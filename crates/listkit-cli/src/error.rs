use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] listkit_core::ValidationError),

    #[error(transparent)]
    Config(#[from] listkit_core::ConfigError),

    #[error("cannot select row {index}: the list has {len} rows")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("load failed: {0}")]
    Load(#[from] listkit_core::SourceError),

    #[error("contact store error: {0}")]
    Store(#[from] listkit_store::StoreError),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Config(_) | Self::SelectionOutOfRange { .. } => 2,
            Self::Load(_) => 3,
            Self::Serialization(_) => 4,
            Self::Store(_) | Self::Delivery(_) | Self::Io(_) => 10,
        }
    }
}
