use axum::{extract::State, response::Json};
use serde::Serialize;

use legalswami_types::CredentialUsage;

use crate::state::AppState;

#[derive(Serialize)]
pub struct KeysResponse {
    pub available: usize,
    pub ready: bool,
    pub keys: Vec<CredentialUsage>,
}

pub async fn list_keys(State(state): State<AppState>) -> Json<KeysResponse> {
    let keys = state.pool().usage_snapshot();
    Json(KeysResponse { available: keys.len(), ready: !keys.is_empty(), keys })
}
