pub mod chat;
pub mod ingredients;
pub mod recipes;

use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}
