//! Core error types for studyquest-core.
//!
//! Every fallible operation in the library reports through this hierarchy.
//! Note that two failure classes deliberately never surface here: a missing
//! or corrupt state blob (the store seeds defaults instead) and advisor
//! failures past the fallback layer (callers get a static message instead).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Advisor-related errors
    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Advisor-specific errors.
///
/// These exist so the fallback layer has something to log; they are not
/// expected to cross the library boundary during normal operation.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// No API key in the keyring or environment
    #[error("No advisor credential configured (keyring 'gemini_api_key' or GEMINI_API_KEY)")]
    MissingCredentials,

    /// Transport-level failure
    #[error("Advisor request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Advisor API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Malformed advisor response: {0}")]
    MalformedResponse(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Session end must come after session start
    #[error("Invalid session bounds: end minute ({end}) must be greater than start minute ({start})")]
    InvalidSessionBounds { start: u16, end: u16 },

    /// Minute-of-day out of the 0..=1439 range
    #[error("Minute-of-day {0} out of range (0-1439)")]
    MinuteOutOfRange(u16),

    /// Could not parse an HH:mm time string
    #[error("Invalid HH:mm time: '{0}'")]
    InvalidTime(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
