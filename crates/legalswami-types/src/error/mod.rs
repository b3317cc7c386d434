//! Typed error definitions for LegalSwami.
//!
//! All errors are serializable so the server can hand them to API clients
//! as structured JSON, and displayable for logging.

mod config;
mod credential;
mod dispatch;

pub use config::ConfigError;
pub use credential::CredentialError;
pub use dispatch::{DispatchError, FailureKind};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = DispatchError::ModelNotFound { model: "llama-x".to_string() };

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("ModelNotFound"));
        assert!(json.contains("llama-x"));

        let deserialized: DispatchError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = DispatchError::AllModelsFailed {
            models: vec!["m1".to_string(), "m2".to_string()],
            last_error: "HTTP 500".to_string(),
        };

        let msg = format!("{}", err);
        assert!(msg.contains("m1, m2"));
        assert!(msg.contains("HTTP 500"));
    }
}
