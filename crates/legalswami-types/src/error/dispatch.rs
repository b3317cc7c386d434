//! Completion dispatch errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a failed upstream attempt.
///
/// Produced by substring and status heuristics, so it is only ever used for
/// logging and operator visibility. The fallback loop treats every kind alike.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// HTTP 401, the credential is no longer accepted
    Unauthorized,
    /// Upstream says the model is decommissioned, unknown or invalid
    ModelUnavailable,
    /// HTTP 429
    RateLimited,
    /// HTTP 5xx without a model marker
    ServerError,
    /// Connection failure or timeout
    Transport,
    /// 2xx with a body we could not read
    MalformedResponse,
    /// Anything else
    Other,
}

impl FailureKind {
    /// Model-specific failures are logged distinctly from transient ones.
    pub fn is_model_specific(self) -> bool {
        matches!(self, Self::ModelUnavailable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::ModelUnavailable => "model_unavailable",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Transport => "transport",
            Self::MalformedResponse => "malformed_response",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the model dispatcher and the upstream client.
///
/// Only [`DispatchError::AllModelsFailed`] normally leaves `send_completion`;
/// the other variants describe single attempts and are recovered inside the
/// fallback loop (or returned as-is when fallback is disabled).
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum DispatchError {
    /// Caller supplied an unusable request (e.g. no messages)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The credential pool is empty
    #[error("No API credential available")]
    NoCredential,

    /// Upstream answered with a non-2xx status
    #[error("Upstream error for {model} (HTTP {status}, {kind}): {message}")]
    Upstream { model: String, status: u16, kind: FailureKind, message: String },

    /// Connection error or timeout before a response arrived
    #[error("Transport error for {model}{}: {message}", if *timed_out { " (timeout)" } else { "" })]
    Transport { model: String, message: String, timed_out: bool },

    /// 2xx response whose body did not carry `choices[0].message.content`
    #[error("Malformed response from {model}: {message}")]
    MalformedResponse { model: String, message: String },

    /// Every configured model failed once during one call
    #[error("All models failed. Tried: {}. Last error: {last_error}", models.join(", "))]
    AllModelsFailed { models: Vec<String>, last_error: String },

    /// Administrative switch to a model that is not configured
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },
}

impl DispatchError {
    /// Classification of this error for logging.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Upstream { kind, .. } => *kind,
            Self::Transport { .. } => FailureKind::Transport,
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
            Self::ModelNotFound { .. } => FailureKind::ModelUnavailable,
            Self::InvalidRequest { .. } | Self::NoCredential | Self::AllModelsFailed { .. } => {
                FailureKind::Other
            }
        }
    }

    /// True when the upstream rejected the credential (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Upstream { status: 401, .. })
    }

    pub fn is_model_specific(&self) -> bool {
        self.kind().is_model_specific()
    }

    /// Get HTTP status code for this error when surfaced by the server.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::ModelNotFound { .. } => 404,
            Self::NoCredential | Self::AllModelsFailed { .. } => 503,
            Self::Transport { timed_out: true, .. } => 504,
            Self::Upstream { .. } | Self::Transport { .. } | Self::MalformedResponse { .. } => 502,
        }
    }
}
