use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::PantryError;
use crate::server::{error::ApiError, extract::ApiJson, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request
        .message
        .filter(|message| !message.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    let assistant = state.assistant.as_ref().ok_or_else(|| {
        PantryError::ProviderUnavailable("No language model provider is configured".to_string())
    })?;

    let recipes = state.recipes.list_recipes().await?;
    let ingredients = state.ingredients.list_ingredients().await?;
    let reply = assistant.reply(&message, &recipes, &ingredients).await?;

    Ok(Json(ChatResponse { reply }))
}
