use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{json_body, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatResponse {
    pub response: String,
}

pub(super) async fn chatbot(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let body = json_body(payload)?;
    let message = body.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    let response = state.advisor.chat(message).await;
    Ok(Json(ChatResponse { response }))
}
