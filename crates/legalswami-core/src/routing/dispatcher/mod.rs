//! Model Dispatcher - sticky model cursor with at-most-once-per-model fallback.
//!
//! `send_completion` starts at the cursor and walks the model list until one
//! model answers or every model has failed once. A failure moves the shared
//! cursor forward, so later calls skip the failing model too. A success
//! leaves the cursor alone.

mod model_list;
mod stats;


pub use model_list::{default_models, normalize_models, parse_model_list, DEFAULT_MODELS};
pub use stats::{ModelCounters, ModelStatsTracker};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use legalswami_types::{ChatMessage, DispatchError, FallbackConfig, ModelStats, RouterConfig};

use super::credential_pool::{preview, CredentialPool};
use super::upstream::{truncate_for_log, CompletionUpstream, LOG_SNIPPET_LEN};

/// Default pause between two attempts of one call.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(500);

/// Fallback tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherSettings {
    pub fallback_enabled: bool,
    /// Accepted but not enforced; each model gets one attempt per call
    pub max_attempts_per_model: u32,
    pub fallback_delay: Duration,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self { fallback_enabled: true, max_attempts_per_model: 2, fallback_delay: FALLBACK_DELAY }
    }
}

impl From<&FallbackConfig> for DispatcherSettings {
    fn from(config: &FallbackConfig) -> Self {
        Self {
            fallback_enabled: config.enabled,
            max_attempts_per_model: config.max_attempts_per_model,
            fallback_delay: Duration::from_millis(config.delay_ms),
        }
    }
}

pub struct ModelDispatcher {
    /// Non-empty, de-duplicated, immutable after construction
    models: Vec<String>,
    /// Always in `[0, models.len())`
    cursor: AtomicUsize,
    stats: ModelStatsTracker,
    pool: Arc<CredentialPool>,
    upstream: Arc<dyn CompletionUpstream>,
    settings: DispatcherSettings,
}

impl ModelDispatcher {
    pub fn new<I, S>(
        models: I,
        pool: Arc<CredentialPool>,
        upstream: Arc<dyn CompletionUpstream>,
        settings: DispatcherSettings,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let models = normalize_models(models);
        let stats = ModelStatsTracker::new(&models);

        tracing::info!(
            fallback = settings.fallback_enabled,
            max_attempts_per_model = settings.max_attempts_per_model,
            "✅ Model dispatcher initialized with {} models: {:?}",
            models.len(),
            models
        );

        Self { models, cursor: AtomicUsize::new(0), stats, pool, upstream, settings }
    }

    pub fn from_config(
        config: &RouterConfig,
        pool: Arc<CredentialPool>,
        upstream: Arc<dyn CompletionUpstream>,
    ) -> Self {
        Self::new(
            parse_model_list(config.models.as_deref()),
            pool,
            upstream,
            DispatcherSettings::from(&config.fallback),
        )
    }

    /// Send one conversation upstream and return the assistant's text.
    ///
    /// With fallback enabled this fails only with
    /// [`DispatchError::AllModelsFailed`] (or `InvalidRequest` for an empty
    /// conversation). With fallback disabled the single attempt's error is
    /// returned unchanged.
    pub async fn send_completion(&self, messages: &[ChatMessage]) -> Result<String, DispatchError> {
        self.send_completion_with_model(messages).await.map(|(content, _)| content)
    }

    /// Like [`Self::send_completion`], also returning the model that answered.
    ///
    /// The cursor is shared, so callers must not read `current_model()` after
    /// the call to learn which model replied.
    pub async fn send_completion_with_model(
        &self,
        messages: &[ChatMessage],
    ) -> Result<(String, String), DispatchError> {
        if messages.is_empty() {
            return Err(DispatchError::InvalidRequest {
                message: "conversation has no messages".to_string(),
            });
        }

        let trace_id = new_trace_id();

        if !self.settings.fallback_enabled {
            let model = self.current_model();
            tracing::info!(trace_id = %trace_id, model = %model, "Sending completion (fallback disabled)");
            let result = self.send_with_model(&model, messages).await;
            self.record_outcome(&trace_id, &model, &result);
            return result.map(|content| (content, model));
        }

        let total = self.models.len();
        let start = self.cursor.load(Ordering::Acquire) % total;
        let mut current = start;
        let mut attempts = 0usize;
        let mut last_error = String::new();

        while attempts < total {
            let model = &self.models[current];
            attempts += 1;
            tracing::info!(
                trace_id = %trace_id,
                model = %model,
                "Trying model (attempt {}/{})",
                attempts,
                total
            );

            let result = self.send_with_model(model, messages).await;
            self.record_outcome(&trace_id, model, &result);
            match result {
                Ok(content) => return Ok((content, model.clone())),
                Err(e) => {
                    last_error = e.to_string();
                    current = (current + 1) % total;
                    self.cursor.store(current, Ordering::Release);

                    if current == start {
                        break;
                    }
                    tokio::time::sleep(self.settings.fallback_delay).await;
                }
            }
        }

        tracing::error!(
            trace_id = %trace_id,
            attempts,
            "❌ All models failed. Last error: {}",
            truncate_for_log(&last_error, LOG_SNIPPET_LEN)
        );
        Err(DispatchError::AllModelsFailed { models: self.models.clone(), last_error })
    }

    /// One attempt against `model` with a freshly acquired credential.
    ///
    /// An HTTP 401 retires the credential before the error is returned.
    pub async fn send_with_model(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, DispatchError> {
        let Some(api_key) = self.pool.acquire() else {
            return Err(DispatchError::NoCredential);
        };

        let result = self.upstream.complete(&api_key, model, messages).await;
        if let Err(e) = &result {
            if e.is_unauthorized() {
                tracing::warn!(model = %model, key = %preview(&api_key), "Upstream rejected API key");
                self.pool.retire(&api_key);
            }
        }
        result
    }

    fn record_outcome(&self, trace_id: &str, model: &str, result: &Result<String, DispatchError>) {
        match result {
            Ok(_) => {
                self.stats.record_success(model);
                tracing::info!(trace_id = %trace_id, model = %model, "Success with model");
            }
            Err(e) => {
                let failures = self.stats.record_failure(model);
                let message = e.to_string();
                tracing::warn!(
                    trace_id = %trace_id,
                    model = %model,
                    kind = %e.kind(),
                    failures,
                    "Model failed: {}",
                    truncate_for_log(&message, LOG_SNIPPET_LEN)
                );
                if e.is_model_specific() {
                    tracing::warn!(
                        trace_id = %trace_id,
                        model = %model,
                        "Model-specific error detected, moving to next model"
                    );
                }
            }
        }
    }

    /// Model the next call will try first.
    pub fn current_model(&self) -> String {
        let idx = self.cursor.load(Ordering::Acquire) % self.models.len();
        self.models[idx].clone()
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Counters for every model, in list order.
    pub fn statistics(&self) -> Vec<ModelStats> {
        self.stats.snapshot(&self.models)
    }

    /// Point the cursor at `model`.
    pub fn switch_to_model(&self, model: &str) -> Result<(), DispatchError> {
        let idx = self
            .models
            .iter()
            .position(|m| m == model)
            .ok_or_else(|| DispatchError::ModelNotFound { model: model.to_string() })?;
        self.cursor.store(idx, Ordering::Release);
        tracing::info!("Switched to model: {}", model);
        Ok(())
    }

    pub fn reset_failure_counts(&self) {
        self.stats.reset_failures();
        tracing::info!("Model failure counters reset");
    }

    pub fn pool(&self) -> &Arc<CredentialPool> {
        &self.pool
    }

    pub fn settings(&self) -> &DispatcherSettings {
        &self.settings
    }
}

fn new_trace_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
