//! Runtime statistics snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-model dispatch counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelStats {
    pub model: String,
    /// Successful completions served by this model
    pub success: u64,
    /// Failures since the last success
    pub failures: u64,
}

/// Usage of one pooled credential. Never carries the full secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialUsage {
    pub preview: String,
    pub requests: u64,
    pub last_used: Option<DateTime<Utc>>,
}
