//! Error types for the Skyfish CLI

use thiserror::Error;

use crate::client::status::StatusCategory;

/// Result type alias for Skyfish operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Folder(#[from] FolderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure; the remote never answered with a status.
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials were rejected or the token was missing from the response.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-200 answer, classified by status code.
    #[error("HTTP {status}: {category}{}", request_id_suffix(.request_id))]
    Status {
        status: u16,
        category: StatusCategory,
        request_id: Option<String>,
    },

    /// Body was not valid JSON or lacked an expected field.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

fn request_id_suffix(request_id: &Option<String>) -> String {
    match request_id {
        Some(id) => format!(" (request id {})", id),
        None => String::new(),
    }
}

impl ApiError {
    /// Whether this failure means the token or credentials were rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Auth(_)
                | ApiError::Status {
                    category: StatusCategory::Unauthorized,
                    ..
                }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `skyfish init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Skyfish {0} not configured. Run `skyfish init` to set up your credentials.")]
    MissingCredential(&'static str),

    #[error("Incorrect login information: check Username, Password and API key.")]
    InvalidCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Cache database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Folder hierarchy errors
#[derive(Debug, Error)]
pub enum FolderError {
    #[error("Folder hierarchy contains a cycle through folder(s) {0:?}")]
    Cycle(Vec<u64>),

    #[error("Folder {0} appears more than once in the listing")]
    DuplicateId(u64),

    #[error("Folder {0} not found")]
    NotFound(u64),
}
