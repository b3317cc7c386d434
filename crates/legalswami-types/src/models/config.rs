//! Router configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_ENCRYPTION_SECRET: &str = "default-encryption-secret-change-this-in-production";

/// Model fallback behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct FallbackConfig {
    /// Try the next model when the current one fails
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Accepted for compatibility; each model is tried at most once per call
    #[validate(range(min = 1_u32, max = 10_u32))]
    #[serde(default = "default_max_attempts")]
    pub max_attempts_per_model: u32,
    /// Pause between two attempts, in milliseconds
    #[validate(range(max = 60_000_u64))]
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts_per_model: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// Full configuration of the credential pool, dispatcher and server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct RouterConfig {
    /// Chat-completion endpoint
    #[validate(url)]
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
    /// Secret used to decrypt encrypted API keys
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_encryption_secret")]
    pub encryption_secret: String,
    /// Single API key (plain or encrypted)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Comma-separated API keys (plain or encrypted)
    #[serde(default)]
    pub api_keys: Option<String>,
    /// Comma-separated model identifiers, tried in order
    #[serde(default)]
    pub models: Option<String>,
    /// Fallback behaviour
    #[serde(default)]
    #[validate(nested)]
    pub fallback: FallbackConfig,
    /// Timeout applied to every upstream call, in seconds
    #[validate(range(min = 1_u64, max = 600_u64))]
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Port for the HTTP API
    #[validate(range(min = 1024_u16, max = 65535_u16))]
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow LAN access (bind to 0.0.0.0)
    #[serde(default)]
    pub allow_lan_access: bool,
    /// Directory for daily-rolling log files; console only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            upstream_url: default_upstream_url(),
            encryption_secret: default_encryption_secret(),
            api_key: None,
            api_keys: None,
            models: None,
            fallback: FallbackConfig::default(),
            request_timeout_secs: default_request_timeout(),
            port: default_port(),
            allow_lan_access: false,
            log_dir: None,
        }
    }
}

impl RouterConfig {
    /// Get the bind address based on LAN access setting.
    pub fn get_bind_address(&self) -> String {
        if self.allow_lan_access {
            "0.0.0.0".to_string()
        } else {
            "127.0.0.1".to_string()
        }
    }

    /// Get the full bind socket address.
    pub fn get_socket_addr(&self) -> String {
        format!("{}:{}", self.get_bind_address(), self.port)
    }

    /// True when the encryption secret was never changed from the shipped default.
    pub fn uses_default_secret(&self) -> bool {
        self.encryption_secret == DEFAULT_ENCRYPTION_SECRET
    }
}

const fn default_true() -> bool {
    true
}

const fn default_max_attempts() -> u32 {
    2
}

const fn default_delay_ms() -> u64 {
    500
}

pub const fn default_request_timeout() -> u64 {
    30
}

pub const fn default_port() -> u16 {
    8080
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_encryption_secret() -> String {
    DEFAULT_ENCRYPTION_SECRET.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RouterConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.fallback.enabled);
        assert_eq!(config.fallback.max_attempts_per_model, 2);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: RouterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_partial_fallback_section() {
        let config: RouterConfig =
            serde_json::from_str(r#"{"fallback":{"enabled":false}}"#).unwrap();
        assert!(!config.fallback.enabled);
        assert_eq!(config.fallback.delay_ms, 500);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = RouterConfig { upstream_url: "not a url".to_string(), ..Default::default() };
        assert!(config.validate().is_err());

        let config = RouterConfig { request_timeout_secs: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let mut config = RouterConfig::default();
        config.fallback.max_attempts_per_model = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let mut config = RouterConfig::default();
        assert_eq!(config.get_socket_addr(), "127.0.0.1:8080");
        config.allow_lan_access = true;
        assert_eq!(config.get_bind_address(), "0.0.0.0");
    }
}
