//! Credential - one pooled upstream API key.

use chrono::{DateTime, Utc};

/// Number of leading characters shown when a key is logged.
pub const PREVIEW_LEN: usize = 8;

/// Short, non-secret rendering of a key for logs and admin output.
pub fn preview(secret: &str) -> String {
    let head: String = secret.chars().take(PREVIEW_LEN).collect();
    format!("{}...", head)
}

/// A live API key with its usage accounting.
#[derive(Debug, Clone)]
pub struct Credential {
    pub secret: String,
    pub usage_count: u64,
    pub last_used: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into(), usage_count: 0, last_used: None }
    }

    /// Record one acquisition.
    pub fn touch(&mut self) {
        self.usage_count += 1;
        self.last_used = Some(Utc::now());
    }

    pub fn preview(&self) -> String {
        preview(&self.secret)
    }
}
