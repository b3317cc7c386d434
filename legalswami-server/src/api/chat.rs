use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use legalswami_core::modules::prompt::build_messages;
use legalswami_core::routing::upstream::user_facing_message;
use legalswami_types::ChatMessage;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub model: String,
}

pub async fn send_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, String)> {
    if payload.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Message is required".to_string()));
    }
    if !state.is_ready() {
        tracing::warn!("Chat request rejected: no API keys available");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "The legal assistant is not configured with a valid API key.".to_string(),
        ));
    }

    let messages = build_messages(&payload.message, &payload.history);
    let dispatcher = state.dispatcher();

    match dispatcher.send_completion_with_model(&messages).await {
        Ok((response, model)) => Ok(Json(ChatReply { response, model })),
        Err(e) => {
            tracing::error!("Chat completion failed: {}", e);
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
            Err((status, user_facing_message(&e)))
        }
    }
}
