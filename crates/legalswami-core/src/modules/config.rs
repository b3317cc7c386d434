//! Configuration loading: JSON file, then environment overrides, then validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use legalswami_types::{ConfigError, RouterConfig};
use validator::Validate;

use crate::routing::credential_pool::{process_env, EnvLookup};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "LEGALSWAMI_CONFIG";
const CONFIG_DIR: &str = "legalswami";
const CONFIG_FILE: &str = "config.json";

/// `<platform config dir>/legalswami/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from the process environment.
pub fn load_config(explicit: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    load_config_with_env(explicit, &process_env)
}

/// Load configuration.
///
/// An explicitly named file (argument or `LEGALSWAMI_CONFIG`) must exist. A
/// missing default file just means defaults.
pub fn load_config_with_env(
    explicit: Option<&Path>,
    env: EnvLookup<'_>,
) -> Result<RouterConfig, ConfigError> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()).map(PathBuf::from));

    let mut config = match named {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound { path: path.display().to_string() });
            }
            read_config_file(&path)?
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_config_file(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                RouterConfig::default()
            }
        },
    };

    apply_env_overrides(&mut config, env);
    validate_config(&config)?;
    Ok(config)
}

pub fn read_config_file(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, &e))?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, &e))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Environment variables win over the file.
pub fn apply_env_overrides(config: &mut RouterConfig, env: EnvLookup<'_>) {
    let get = |name: &str| env(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(url) = get("GROQ_API_URL") {
        config.upstream_url = url;
    }
    if let Some(models) = get("GROQ_API_MODELS") {
        config.models = Some(models);
    }
    if let Some(secret) = get("API_KEY_ENCRYPTION_SECRET") {
        config.encryption_secret = secret;
    }
    if let Some(dir) = get("LEGALSWAMI_LOG_DIR") {
        config.log_dir = Some(dir);
    }
    if let Some(v) = get("GROQ_FALLBACK_ENABLED") {
        if let Some(enabled) = parse_flag("GROQ_FALLBACK_ENABLED", &v) {
            config.fallback.enabled = enabled;
        }
    }
    if let Some(v) = get("GROQ_FALLBACK_MAX_ATTEMPTS") {
        if let Some(n) = parse_number("GROQ_FALLBACK_MAX_ATTEMPTS", &v) {
            config.fallback.max_attempts_per_model = n;
        }
    }
    if let Some(v) = get("GROQ_REQUEST_TIMEOUT_SECS") {
        if let Some(secs) = parse_number("GROQ_REQUEST_TIMEOUT_SECS", &v) {
            config.request_timeout_secs = secs;
        }
    }
    if let Some(v) = get("LEGALSWAMI_PORT") {
        if let Some(port) = parse_number("LEGALSWAMI_PORT", &v) {
            config.port = port;
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("Ignoring {}: not a boolean ({})", name, value);
            None
        }
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("Ignoring {}: not a number ({})", name, value);
            None
        }
    }
}

pub fn validate_config(config: &RouterConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|errors| {
        let field = errors
            .errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "config".to_string());
        ConfigError::ValidationError { field, message: errors.to_string() }
    })
}
