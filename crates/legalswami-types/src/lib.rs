//! # LegalSwami Types
//!
//! Wire types, configuration models, and error definitions shared by the
//! LegalSwami crates.
//!
//! - **`error`** - Typed errors for dispatch, credential resolution and configuration
//! - **`models`** - Chat messages, completion request/response bodies, config, stats
//!
//! ## Architecture Role
//!
//! ```text
//!        legalswami-types (this crate)
//!                │
//!                ▼
//!        legalswami-core
//!                │
//!                ▼
//!        legalswami-server
//! ```

pub mod error;
pub mod models;

pub use error::{ConfigError, CredentialError, DispatchError, FailureKind};

pub use models::{
    ChatMessage, CompletionRequest, CompletionResponse, CredentialUsage, FallbackConfig,
    ModelStats, Role, RouterConfig,
};
