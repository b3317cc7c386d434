//! Unified error types for LegalSwami Core.

use serde::Serialize;
use thiserror::Error;

use legalswami_types::{ConfigError, CredentialError, DispatchError};

/// Main error type for core operations outside the dispatch hot path.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Network request failed (HTTP client construction or transport).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential could not be resolved or encrypted.
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Completion dispatch failed.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Logger could not be installed.
    #[error("Logger error: {0}")]
    Logger(String),

    /// Unclassified error with message.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for core operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Unknown(s)
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::Unknown(s.to_string())
    }
}
