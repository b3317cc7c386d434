//! Upstream chat-completion endpoint.

pub mod classify;
mod client;

#[cfg(test)]
mod tests;

pub use classify::{
    classify_failure, is_model_specific_error, truncate_for_log, user_facing_message,
    LOG_SNIPPET_LEN,
};
pub use client::{build_http_client, UpstreamClient};

use async_trait::async_trait;
use legalswami_types::{ChatMessage, DispatchError};

/// One completion call against one model with one credential.
///
/// The dispatcher only sees this trait, so the fallback loop can be driven by
/// a scripted upstream in tests.
#[async_trait]
pub trait CompletionUpstream: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, DispatchError>;
}
