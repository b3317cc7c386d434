//! Test helpers for legalswami-server unit tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use legalswami_core::routing::upstream::CompletionUpstream;
use legalswami_core::{CredentialPool, DispatcherSettings, ModelDispatcher};
use legalswami_types::{ChatMessage, DispatchError, FailureKind, RouterConfig};

use crate::state::AppState;

pub const TEST_KEY: &str = "gsk_testtesttesttesttesttesttesttesttest01";

/// Upstream that answers every call with the same reply and echoes the
/// last user message when `echo` is set.
pub struct FixedUpstream {
    reply: Result<String, DispatchError>,
    echo: bool,
}

impl FixedUpstream {
    pub fn answering(text: &str) -> Self {
        Self { reply: Ok(text.to_string()), echo: false }
    }

    pub fn echoing() -> Self {
        Self { reply: Ok(String::new()), echo: true }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err(DispatchError::Upstream {
                model: "any".to_string(),
                status: 503,
                kind: FailureKind::ServerError,
                message: "API Error: upstream secret detail".to_string(),
            }),
            echo: false,
        }
    }
}

#[async_trait]
impl CompletionUpstream for FixedUpstream {
    async fn complete(
        &self,
        _api_key: &str,
        _model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, DispatchError> {
        if self.echo {
            let count = messages.len();
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            return Ok(format!("{count}:{last}"));
        }
        self.reply.clone()
    }
}

/// `AppState` over the given models, keys and upstream, without delays.
pub fn test_app_state_with(
    models: &[&str],
    keys: &[&str],
    upstream: FixedUpstream,
) -> AppState {
    let pool = Arc::new(CredentialPool::from_secrets(keys.iter().copied()));
    let settings = DispatcherSettings { fallback_delay: Duration::ZERO, ..Default::default() };
    let dispatcher = Arc::new(ModelDispatcher::new(
        models.iter().copied(),
        Arc::clone(&pool),
        Arc::new(upstream) as Arc<dyn CompletionUpstream>,
        settings,
    ));
    AppState::new_with_components(pool, dispatcher, RouterConfig::default())
}

/// Minimal ready `AppState`: two models, one key, upstream says "ok".
pub fn test_app_state() -> AppState {
    test_app_state_with(&["m1", "m2"], &[TEST_KEY], FixedUpstream::answering("ok"))
}
