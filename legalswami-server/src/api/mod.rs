//! API Routes
//!
//! REST endpoints for the chat frontend and for operators.

mod chat;
mod keys;
mod models;

#[cfg(test)]
mod chat_tests;
#[cfg(test)]
mod keys_tests;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Status
        .route("/status", get(get_status))
        // Chat
        .route("/chat", post(chat::send_chat))
        // Models
        .route("/models", get(models::list_models))
        .route("/models/stats", get(models::get_model_stats))
        .route("/models/switch", post(models::switch_model))
        .route("/models/reset-failures", post(models::reset_failures))
        // Keys
        .route("/keys", get(keys::list_keys))
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}

#[derive(Serialize)]
pub(crate) struct StatusResponse {
    pub version: String,
    pub ready: bool,
    pub current_model: String,
    pub available_keys: usize,
    pub fallback_enabled: bool,
    pub upstream_url: String,
    pub request_timeout_secs: u64,
}

pub(crate) async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let dispatcher = state.dispatcher();
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        ready: state.is_ready(),
        current_model: dispatcher.current_model(),
        available_keys: state.pool().len(),
        fallback_enabled: dispatcher.settings().fallback_enabled,
        upstream_url: state.config().upstream_url.clone(),
        request_timeout_secs: state.config().request_timeout_secs,
    })
}
