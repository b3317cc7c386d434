//! Domain models shared across LegalSwami crates.

mod chat;
mod completion;
mod config;
mod stats;

pub use chat::{ChatMessage, Role};
pub use completion::{
    CompletionChoice, CompletionMessage, CompletionRequest, CompletionResponse,
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use config::{
    FallbackConfig, RouterConfig, DEFAULT_ENCRYPTION_SECRET, DEFAULT_UPSTREAM_URL,
};
pub use stats::{CredentialUsage, ModelStats};
