use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::model::{Ingredient, IngredientUpdate, NewIngredient};
use crate::server::{error::ApiError, extract::ApiJson, AppState};

const NOT_FOUND: &str = "Ingredient not found";

/// A single object or an array of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// GET /ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    Ok(Json(state.ingredients.list_ingredients().await?))
}

/// GET /ingredients/:id
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, ApiError> {
    state
        .ingredients
        .get_ingredient(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
}

/// PUT /ingredients/:id
///
/// Only the fields present in the body change.
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<IngredientUpdate>,
) -> Result<Json<Ingredient>, ApiError> {
    state
        .ingredients
        .update_ingredient(&id, update)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
}

/// POST /ingredients
///
/// An object stores one ingredient and returns it; an array stores all of
/// them in one batch and returns the array.
pub async fn create_ingredients(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OneOrMany<NewIngredient>>,
) -> Result<Response, ApiError> {
    let response = match body {
        OneOrMany::Many(ingredients) => {
            Json(state.ingredients.insert_ingredients(ingredients).await?).into_response()
        }
        OneOrMany::One(ingredient) => {
            Json(state.ingredients.insert_ingredient(ingredient).await?).into_response()
        }
    };
    Ok(response)
}
