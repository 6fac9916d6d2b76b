// --- File: crates/newtab_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all newtab crates.
///
/// Feature crates keep their own error enums and convert into this one at the
/// HTTP boundary.
#[derive(Error, Debug)]
pub enum NewtabError {
    /// A required request parameter was absent
    #[error("{0}")]
    MissingInput(String),

    /// No session cookie, or the session was rejected
    #[error("Unauthorized")]
    Unauthenticated,

    /// The identity or calendar provider call failed
    #[error("External service error: {service} - {message}")]
    Upstream { service: String, message: String },

    /// Best-effort remote persistence failed
    #[error("Sync failed: {0}")]
    SyncFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to parse data: {0}")]
    ParseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl NewtabError {
    /// The message shown to callers. Upstream and internal detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            NewtabError::MissingInput(msg) => msg.clone(),
            NewtabError::Unauthenticated => "Unauthorized".to_string(),
            NewtabError::ParseError(msg) => msg.clone(),
            NewtabError::Upstream { .. } => "Upstream service request failed".to_string(),
            NewtabError::SyncFailure(_) => "Sync failed".to_string(),
            NewtabError::ConfigError(_)
            | NewtabError::StorageError(_)
            | NewtabError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for NewtabError {
    fn status_code(&self) -> u16 {
        match self {
            NewtabError::MissingInput(_) => 400,
            NewtabError::Unauthenticated => 401,
            NewtabError::Upstream { .. } => 500,
            NewtabError::SyncFailure(_) => 500,
            NewtabError::ConfigError(_) => 500,
            NewtabError::ParseError(_) => 400,
            NewtabError::StorageError(_) => 500,
            NewtabError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for NewtabError {
    fn from(err: reqwest::Error) -> Self {
        upstream("http", err)
    }
}

impl From<serde_json::Error> for NewtabError {
    fn from(err: serde_json::Error) -> Self {
        NewtabError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for NewtabError {
    fn from(err: std::io::Error) -> Self {
        NewtabError::StorageError(err.to_string())
    }
}

// Utility functions for error handling
pub fn missing_input<T: fmt::Display>(message: T) -> NewtabError {
    NewtabError::MissingInput(message.to_string())
}

pub fn upstream<T: fmt::Display>(service: &str, message: T) -> NewtabError {
    NewtabError::Upstream {
        service: service.to_string(),
        message: message.to_string(),
    }
}
