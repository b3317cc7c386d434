//! Credential resolution errors.
//!
//! These never abort startup: the resolver logs them and drops the
//! offending value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum CredentialError {
    /// Value looked encrypted but could not be decrypted or decoded
    #[error("Credential from {source_label} could not be decrypted: {message}")]
    Decrypt {
        /// Where the raw value came from (config key or env var)
        source_label: String,
        /// Description of the failure
        message: String,
    },

    /// Value (after optional decryption) is not a well-formed API key
    #[error("Credential from {source_label} has invalid format ({preview})")]
    InvalidFormat {
        /// Where the raw value came from (config key or env var)
        source_label: String,
        /// Short, non-secret preview of the value
        preview: String,
    },
}

impl CredentialError {
    pub fn source_label(&self) -> &str {
        match self {
            Self::Decrypt { source_label, .. } | Self::InvalidFormat { source_label, .. } => {
                source_label
            }
        }
    }
}
