use thiserror::Error;

use crate::domain::error::ValidationError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user {user_id} is not an admin")]
    PermissionDenied { user_id: u64 },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// How an error is surfaced to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; the user gets a specific correction prompt.
    Validation,
    /// Backend read/write failed; the user gets a generic server error.
    StoreUnavailable,
    /// Non-admin tried an admin action.
    PermissionDenied,
    /// Startup or programming error, never produced by a user request.
    Internal,
}

impl Error {
    /// Classify this error for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::StoreUnavailable(_)
            | Self::Json(_)
            | Self::Http(_)
            | Self::Io(_)
            | Self::Connection(_)
            | Self::Database(_)
            | Self::Parse(_) => ErrorKind::StoreUnavailable,
            Self::Config(_) | Self::Url(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
