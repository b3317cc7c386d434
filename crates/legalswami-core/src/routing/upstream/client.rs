use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use legalswami_types::{ChatMessage, CompletionRequest, CompletionResponse, DispatchError, RouterConfig};

use super::classify::{classify_failure, truncate_for_log, LOG_SNIPPET_LEN};
use super::CompletionUpstream;
use crate::error::{AppError, AppResult};

/// Upper bound on upstream body text kept inside an error.
const ERROR_BODY_LIMIT: usize = 500;

/// Build the shared HTTP client with an explicit per-request timeout.
pub fn build_http_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .tcp_nodelay(true)
        .build()
        .map_err(AppError::Network)
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http_client: Client,
    url: String,
}

impl UpstreamClient {
    pub fn new(url: &str, timeout: Duration) -> AppResult<Self> {
        let url = url.trim();
        if url::Url::parse(url).is_err() {
            return Err(AppError::Config(legalswami_types::ConfigError::ValidationError {
                field: "upstream_url".to_string(),
                message: format!("not a valid URL: {}", url),
            }));
        }
        let http_client = build_http_client(timeout)?;
        Ok(Self { http_client, url: url.to_string() })
    }

    pub fn from_config(config: &RouterConfig) -> AppResult<Self> {
        Self::new(&config.upstream_url, Duration::from_secs(config.request_timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionUpstream for UpstreamClient {
    async fn complete(
        &self,
        api_key: &str,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, DispatchError> {
        let body = CompletionRequest::for_model(model, messages.to_vec());

        let response = self
            .http_client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DispatchError::Transport {
                model: model.to_string(),
                message: e.to_string(),
                timed_out: e.is_timeout(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| DispatchError::Transport {
            model: model.to_string(),
            message: format!("failed to read response body: {}", e),
            timed_out: e.is_timeout(),
        })?;

        if !status.is_success() {
            let status = status.as_u16();
            let kind = classify_failure(status, &text);
            tracing::debug!(
                model = %model,
                status,
                kind = %kind,
                "Upstream error body: {}",
                truncate_for_log(&text, LOG_SNIPPET_LEN)
            );
            return Err(DispatchError::Upstream {
                model: model.to_string(),
                status,
                kind,
                message: format!("API Error: {}", truncate_for_log(&text, ERROR_BODY_LIMIT)),
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| DispatchError::MalformedResponse {
                model: model.to_string(),
                message: format!("Failed to parse API response: {}", e),
            })?;

        parsed.first_content().map(str::to_string).ok_or_else(|| {
            DispatchError::MalformedResponse {
                model: model.to_string(),
                message: "response has no choices[0].message.content".to_string(),
            }
        })
    }
}
