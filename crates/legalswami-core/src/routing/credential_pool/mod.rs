//! Credential Pool - least-used rotation over upstream API keys.
//!
//! Keys are resolved once at startup from every configured source. Each
//! `acquire()` hands out the key with the lowest usage count and bumps the
//! count under the same lock, so concurrent callers spread across keys.
//! A key the upstream rejects with HTTP 401 is retired and never comes back.

pub mod cipher;
mod credential;
pub mod resolver;

pub use cipher::{decrypt_api_key, encrypt_api_key};
pub use credential::{preview, Credential};
pub use resolver::{
    collect_raw_credentials, default_sources, is_probably_encrypted, is_valid_key,
    process_env, resolve_all, resolve_credential, CredentialSource, EnvLookup, RawCredential,
};

use legalswami_types::{CredentialUsage, RouterConfig};
use parking_lot::Mutex;

/// Pool of live API keys shared by every in-flight dispatch.
#[derive(Debug, Default)]
pub struct CredentialPool {
    /// Insertion order is the tie-breaker for equal usage counts.
    credentials: Mutex<Vec<Credential>>,
}

impl CredentialPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from already-resolved keys. Duplicates collapse.
    pub fn from_secrets<I, S>(secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pool = Self::new();
        for secret in secrets {
            pool.insert(secret);
        }
        pool
    }

    /// Resolve keys from the default sources.
    ///
    /// Never fails: with no usable key the pool is simply not ready.
    pub fn from_config(config: &RouterConfig, env: EnvLookup<'_>) -> Self {
        Self::from_sources(&default_sources(), config, env)
    }

    pub fn from_sources(
        sources: &[CredentialSource],
        config: &RouterConfig,
        env: EnvLookup<'_>,
    ) -> Self {
        tracing::info!("🚀 Initializing credential pool...");
        if config.uses_default_secret() {
            tracing::warn!("⚠️ Using the default API key encryption secret");
        }

        let pool = Self::from_secrets(resolve_all(sources, config, env));
        let count = pool.len();

        if count == 0 {
            tracing::error!(
                "⚠️ No valid API keys available! Set GROQ_API_KEY, GROQ_API_KEYS or GROQ_API_KEY_1..10"
            );
        } else {
            tracing::info!("🎉 Credential pool ready with {} API key(s)", count);
        }
        pool
    }

    /// Add a key. Returns false when it is already pooled.
    pub fn insert(&self, secret: impl Into<String>) -> bool {
        let secret = secret.into();
        let mut credentials = self.credentials.lock();
        if credentials.iter().any(|c| c.secret == secret) {
            return false;
        }
        credentials.push(Credential::new(secret));
        true
    }

    /// Least-used key, with its counter already incremented.
    ///
    /// `None` when the pool is empty; the caller decides whether that is fatal.
    pub fn acquire(&self) -> Option<String> {
        let mut credentials = self.credentials.lock();
        let Some(credential) = credentials.iter_mut().min_by_key(|c| c.usage_count) else {
            tracing::warn!("❌ No API keys available for rotation");
            return None;
        };
        credential.touch();
        tracing::debug!(
            key = %credential.preview(),
            requests = credential.usage_count,
            "🔄 Rotated to API key"
        );
        Some(credential.secret.clone())
    }

    /// Permanently remove a key. Returns false if it was already gone.
    pub fn retire(&self, secret: &str) -> bool {
        let mut credentials = self.credentials.lock();
        let before = credentials.len();
        credentials.retain(|c| c.secret != secret);
        let removed = credentials.len() < before;
        if removed {
            tracing::warn!(
                key = %preview(secret),
                remaining = credentials.len(),
                "❌ Retired API key after authentication failure"
            );
        }
        removed
    }

    pub fn contains(&self, secret: &str) -> bool {
        self.credentials.lock().iter().any(|c| c.secret == secret)
    }

    pub fn len(&self) -> usize {
        self.credentials.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.lock().is_empty()
    }

    /// Ready means at least one key can be acquired.
    pub fn is_ready(&self) -> bool {
        !self.is_empty()
    }

    /// Per-key usage without exposing the secrets.
    pub fn usage_snapshot(&self) -> Vec<CredentialUsage> {
        self.credentials
            .lock()
            .iter()
            .map(|c| CredentialUsage {
                preview: c.preview(),
                requests: c.usage_count,
                last_used: c.last_used,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
