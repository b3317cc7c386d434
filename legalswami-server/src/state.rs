//! Application State
//!
//! Holds the process-wide credential pool and model dispatcher.

use anyhow::Result;
use std::sync::Arc;

use legalswami_core::routing::credential_pool::process_env;
use legalswami_core::routing::upstream::CompletionUpstream;
use legalswami_core::{CredentialPool, ModelDispatcher, UpstreamClient};
use legalswami_types::RouterConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub pool: Arc<CredentialPool>,
    pub dispatcher: Arc<ModelDispatcher>,
    pub config: RouterConfig,
}

impl AppState {
    /// Resolve keys, build the upstream client and the dispatcher.
    pub fn from_config(config: RouterConfig) -> Result<Self> {
        let pool = Arc::new(CredentialPool::from_config(&config, &process_env));
        let upstream: Arc<dyn CompletionUpstream> =
            Arc::new(UpstreamClient::from_config(&config)?);
        let dispatcher = Arc::new(ModelDispatcher::from_config(&config, Arc::clone(&pool), upstream));
        Ok(Self::new_with_components(pool, dispatcher, config))
    }

    /// Create AppState with pre-built components
    pub fn new_with_components(
        pool: Arc<CredentialPool>,
        dispatcher: Arc<ModelDispatcher>,
        config: RouterConfig,
    ) -> Self {
        Self { inner: Arc::new(AppStateInner { pool, dispatcher, config }) }
    }

    pub fn pool(&self) -> &Arc<CredentialPool> {
        &self.inner.pool
    }

    pub fn dispatcher(&self) -> &Arc<ModelDispatcher> {
        &self.inner.dispatcher
    }

    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    pub fn is_ready(&self) -> bool {
        self.inner.pool.is_ready()
    }
}
