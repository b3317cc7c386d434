//! Errors from reading `config.json` and checking its values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// A file named by `--config` or `LEGALSWAMI_CONFIG` does not exist.
    #[error("Config file not found: {path}")]
    NotFound { path: String },

    #[error("Cannot read config file {path}: {message}")]
    ReadError { path: String, message: String },

    /// Not valid JSON, or JSON that does not fit `RouterConfig`.
    #[error("Invalid config in {path} at line {line}, column {column}: {message}")]
    ParseError {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A value out of range once env overrides are applied.
    #[error("Invalid value for {field}: {message}")]
    ValidationError { field: String, message: String },
}

impl ConfigError {
    pub fn read(path: &Path, e: &std::io::Error) -> Self {
        Self::ReadError { path: path.display().to_string(), message: e.to_string() }
    }

    /// Keeps the position serde_json reports so the bad line can be found.
    pub fn parse(path: &Path, e: &serde_json::Error) -> Self {
        Self::ParseError {
            path: path.display().to_string(),
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}
