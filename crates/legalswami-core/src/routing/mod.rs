//! Credential rotation and model fallback.

pub mod credential_pool;
pub mod dispatcher;
pub mod upstream;
