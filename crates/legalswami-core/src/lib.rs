//! # LegalSwami Core
//!
//! Request routing between the chat layer and the upstream LLM provider.
//!
//! ```text
//! legalswami-core/src/
//! ├── routing/
//! │   ├── credential_pool/  # API key resolution, decryption, least-used rotation
//! │   ├── dispatcher/       # Model list, sticky cursor, fallback loop
//! │   └── upstream/         # HTTP client and failure classification
//! └── modules/              # Config loading, logger bootstrap, legal prompt
//! ```

#![allow(
    clippy::significant_drop_tightening,
    reason = "Mutex guards are held for the whole pool operation on purpose"
)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod error;
pub mod modules;
pub mod routing;

pub use error::{AppError, AppResult};
pub use routing::credential_pool::CredentialPool;
pub use routing::dispatcher::{DispatcherSettings, ModelDispatcher};
pub use routing::upstream::UpstreamClient;
