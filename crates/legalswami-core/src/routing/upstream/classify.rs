//! Upstream failure classification and sanitization.
//!
//! Classification is a best-effort reading of status codes and error-body
//! wording. Upstream messages are not a stable contract, so the result only
//! annotates logs; the fallback loop never branches on it.

use legalswami_types::{DispatchError, FailureKind};

/// Longest slice of an upstream body written to a single log line.
pub const LOG_SNIPPET_LEN: usize = 100;

const MODEL_MARKERS: [&str; 6] = [
    "model_decommissioned",
    "decommissioned",
    "model_not_found",
    "model not found",
    "invalid model",
    "model does not exist",
];

/// True when the text says the model itself is gone or unknown.
pub fn is_model_specific_error(text: &str) -> bool {
    let lower = text.to_lowercase();
    MODEL_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Classify a non-2xx upstream response.
pub fn classify_failure(status: u16, body: &str) -> FailureKind {
    if status == 401 {
        return FailureKind::Unauthorized;
    }
    if is_model_specific_error(body) {
        return FailureKind::ModelUnavailable;
    }
    match status {
        404 => FailureKind::ModelUnavailable,
        429 => FailureKind::RateLimited,
        500..=599 => FailureKind::ServerError,
        _ => FailureKind::Other,
    }
}

/// Cut `text` to at most `max` characters for logging.
pub fn truncate_for_log(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Message safe to show an end user for a failed dispatch.
///
/// Never includes upstream bodies, model error text or key material.
pub fn user_facing_message(err: &DispatchError) -> String {
    match err {
        DispatchError::AllModelsFailed { .. } => {
            "The legal assistant is temporarily unavailable. Please try again in a few minutes."
                .to_string()
        }
        DispatchError::NoCredential => {
            "The legal assistant is not configured with a valid API key.".to_string()
        }
        DispatchError::InvalidRequest { message } => format!("Invalid request: {}", message),
        DispatchError::ModelNotFound { model } => format!("Model not available: {}", model),
        DispatchError::Transport { timed_out: true, .. } => {
            "The legal assistant took too long to respond. Please try again.".to_string()
        }
        DispatchError::Upstream { status, kind, .. } => match kind {
            FailureKind::RateLimited => format!("Rate limited (HTTP {})", status),
            FailureKind::Unauthorized => format!("Authentication failed (HTTP {})", status),
            FailureKind::ModelUnavailable => format!("Model not available (HTTP {})", status),
            FailureKind::ServerError => format!("Upstream server error (HTTP {})", status),
            _ => format!("Upstream error (HTTP {})", status),
        },
        DispatchError::Transport { .. } | DispatchError::MalformedResponse { .. } => {
            "Upstream request failed".to_string()
        }
    }
}
