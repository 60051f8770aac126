use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::model::{NewRecipe, Recipe};
use crate::pipelines::RecipeFileIngestor;
use crate::server::{error::ApiError, extract::ApiJson, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFileRequest {
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseFileResponse {
    pub message: String,
    pub recipes: Vec<Recipe>,
}

/// POST /recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    ApiJson(recipe): ApiJson<NewRecipe>,
) -> Result<Json<Recipe>, ApiError> {
    Ok(Json(state.recipes.insert_recipe(recipe).await?))
}

/// GET /recipes
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(state.recipes.list_recipes().await?))
}

/// POST /recipes/parse-file
///
/// Reads a plain-text recipe file on the server's filesystem and stores
/// every recipe in it.
pub async fn parse_file(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ParseFileRequest>,
) -> Result<Json<ParseFileResponse>, ApiError> {
    let file_path = request
        .file_path
        .filter(|path| !path.is_empty())
        .ok_or_else(|| ApiError::BadRequest("File path is required".to_string()))?;

    let report = RecipeFileIngestor::new(state.recipes.clone())
        .ingest(&file_path)
        .await?;

    Ok(Json(ParseFileResponse {
        message: format!("Successfully parsed and saved {} recipes", report.count),
        recipes: report.recipes,
    }))
}
