//! OpenAI-compatible chat-completion bodies.
//!
//! Only the fields the dispatcher sends or reads are modelled; unknown
//! response fields are ignored.

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;

/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Completion length cap sent with every request.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Request body for `POST <upstream_url>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl CompletionRequest {
    /// Non-streaming request with the fixed sampling parameters.
    pub fn for_model(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionMessage {
    #[serde(default)]
    pub role: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    /// `choices[0].message.content`, if present.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}
