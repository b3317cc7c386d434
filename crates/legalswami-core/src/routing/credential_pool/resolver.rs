//! Credential resolution: gather raw values from every configured source,
//! decrypt the encrypted ones and keep only well-formed API keys.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::sync::OnceLock;

use legalswami_types::{CredentialError, RouterConfig};

use super::cipher::decrypt_api_key;
use super::credential::preview;

/// Literal prefix of every upstream API key.
pub const KEY_PREFIX: &str = "gsk_";
/// Shortest accepted API key.
pub const MIN_KEY_LEN: usize = 40;
/// Highest suffix scanned for numbered environment variables.
pub const NUMBERED_ENV_LIMIT: u32 = 10;

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
static BASE64_REGEX: OnceLock<Regex> = OnceLock::new();

fn key_regex() -> &'static Regex {
    KEY_REGEX.get_or_init(|| Regex::new(r"^gsk_[a-zA-Z0-9]+$").expect("Key regex is valid"))
}

fn base64_regex() -> &'static Regex {
    BASE64_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").expect("Base64 regex is valid"))
}

/// Environment lookup, injectable so tests never touch the process env.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Reads the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// One place raw API keys may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `api_key` in the config file
    ConfigSingle,
    /// `api_keys` in the config file, comma-separated
    ConfigList,
    /// A single environment variable
    Env(String),
    /// A comma-separated environment variable
    EnvList(String),
    /// `<prefix>1` through `<prefix><max>`
    EnvNumbered { prefix: String, max: u32 },
}

impl CredentialSource {
    pub fn label(&self) -> String {
        match self {
            Self::ConfigSingle => "config api_key".to_string(),
            Self::ConfigList => "config api_keys".to_string(),
            Self::Env(var) | Self::EnvList(var) => var.clone(),
            Self::EnvNumbered { prefix, max } => format!("{}1..{}{}", prefix, prefix, max),
        }
    }

    fn collect(&self, config: &RouterConfig, env: EnvLookup<'_>, out: &mut Vec<RawCredential>) {
        match self {
            Self::ConfigSingle => {
                push_single(out, self.label(), config.api_key.as_deref());
            }
            Self::ConfigList => {
                push_list(out, &self.label(), config.api_keys.as_deref());
            }
            Self::Env(var) => {
                push_single(out, var.clone(), env(var.as_str()).as_deref());
            }
            Self::EnvList(var) => {
                push_list(out, var, env(var.as_str()).as_deref());
            }
            Self::EnvNumbered { prefix, max } => {
                for i in 1..=*max {
                    let var = format!("{}{}", prefix, i);
                    let value = env(var.as_str());
                    push_single(out, var, value.as_deref());
                }
            }
        }
    }
}

/// A raw, still possibly encrypted, value plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCredential {
    pub source: String,
    pub value: String,
}

fn push_single(out: &mut Vec<RawCredential>, source: String, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        out.push(RawCredential { source, value: value.to_string() });
    }
}

fn push_list(out: &mut Vec<RawCredential>, source: &str, value: Option<&str>) {
    for item in value.unwrap_or_default().split(',') {
        push_single(out, source.to_string(), Some(item));
    }
}

/// Config keys, `GROQ_API_KEY`, `GROQ_API_KEYS`, then `GROQ_API_KEY_1..10`.
pub fn default_sources() -> Vec<CredentialSource> {
    vec![
        CredentialSource::ConfigSingle,
        CredentialSource::ConfigList,
        CredentialSource::Env("GROQ_API_KEY".to_string()),
        CredentialSource::EnvList("GROQ_API_KEYS".to_string()),
        CredentialSource::EnvNumbered {
            prefix: "GROQ_API_KEY_".to_string(),
            max: NUMBERED_ENV_LIMIT,
        },
    ]
}

/// Gather trimmed, non-empty raw values from all sources, in source order.
pub fn collect_raw_credentials(
    sources: &[CredentialSource],
    config: &RouterConfig,
    env: EnvLookup<'_>,
) -> Vec<RawCredential> {
    let mut out = Vec::new();
    for source in sources {
        let before = out.len();
        source.collect(config, env, &mut out);
        let found = out.len() - before;
        if found > 0 {
            tracing::info!("✅ Found {} API key(s) from {}", found, source.label());
        }
    }
    out
}

/// Well-formed plain API key: prefix, minimum length, alphanumeric body.
pub fn is_valid_key(key: &str) -> bool {
    key.len() >= MIN_KEY_LEN && key.starts_with(KEY_PREFIX) && key_regex().is_match(key)
}

/// Heuristic for values that need decrypting before use.
///
/// Long `gsk_` values are plain keys; anything else that is valid base64 is
/// assumed to be encrypted.
pub fn is_probably_encrypted(key: &str) -> bool {
    if key.starts_with(KEY_PREFIX) && key.len() > MIN_KEY_LEN {
        return false;
    }
    base64_regex().is_match(key) && STANDARD.decode(key).is_ok()
}

/// Turn one raw value into a usable API key.
pub fn resolve_credential(raw: &RawCredential, secret: &str) -> Result<String, CredentialError> {
    let key = if is_probably_encrypted(&raw.value) {
        let plain = decrypt_api_key(&raw.value, secret).map_err(|message| {
            CredentialError::Decrypt { source_label: raw.source.clone(), message }
        })?;
        tracing::info!("🔓 Decrypted API key from {}", raw.source);
        plain
    } else {
        raw.value.clone()
    };

    if is_valid_key(&key) {
        Ok(key)
    } else {
        Err(CredentialError::InvalidFormat {
            source_label: raw.source.clone(),
            preview: preview(&key),
        })
    }
}

/// Resolve every source into a de-duplicated list of valid keys.
///
/// Values that fail to resolve are logged and skipped.
pub fn resolve_all(
    sources: &[CredentialSource],
    config: &RouterConfig,
    env: EnvLookup<'_>,
) -> Vec<String> {
    let raw = collect_raw_credentials(sources, config, env);
    tracing::info!("📋 Total raw API keys collected: {}", raw.len());

    let mut keys: Vec<String> = Vec::with_capacity(raw.len());
    for item in &raw {
        match resolve_credential(item, &config.encryption_secret) {
            Ok(key) if keys.contains(&key) => {
                tracing::debug!("Skipping duplicate API key {}", preview(&key));
            }
            Ok(key) => {
                tracing::info!("✅ Added valid API key {}", preview(&key));
                keys.push(key);
            }
            Err(e) => {
                tracing::warn!("⚠️ Skipping API key: {}", e);
            }
        }
    }
    keys
}
