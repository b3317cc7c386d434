use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use legalswami_types::ModelStats;

use crate::state::AppState;

#[derive(Serialize, Deserialize)]
pub struct ModelsResponse {
    pub current: String,
    pub models: Vec<String>,
}

#[derive(Deserialize)]
pub struct SwitchModelRequest {
    pub model: String,
}

fn models_response(state: &AppState) -> ModelsResponse {
    let dispatcher = state.dispatcher();
    ModelsResponse { current: dispatcher.current_model(), models: dispatcher.models().to_vec() }
}

pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(models_response(&state))
}

pub async fn get_model_stats(State(state): State<AppState>) -> Json<Vec<ModelStats>> {
    Json(state.dispatcher().statistics())
}

pub async fn switch_model(
    State(state): State<AppState>,
    Json(payload): Json<SwitchModelRequest>,
) -> Result<Json<ModelsResponse>, (StatusCode, String)> {
    state
        .dispatcher()
        .switch_to_model(payload.model.trim())
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))?;
    Ok(Json(models_response(&state)))
}

pub async fn reset_failures(State(state): State<AppState>) -> Json<Vec<ModelStats>> {
    state.dispatcher().reset_failure_counts();
    Json(state.dispatcher().statistics())
}
