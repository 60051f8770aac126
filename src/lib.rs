//! A small recipe and pantry service.
//!
//! Recipes and ingredients live in a SQLite-backed [`store`], plain-text
//! recipe files are imported through the [`parser`] and the
//! [`pipelines::file`] ingestion driver, and the [`chat`] assistant asks a
//! language model for cooking suggestions based on what is stored.
//!
//! # Example
//!
//! ```
//! let recipes = pantry_chef::parse_recipes("Tea\nIngredients:\nWater\nInstructions:\nBoil water");
//! assert_eq!(recipes[0].name, "Tea");
//! assert_eq!(recipes[0].ingredients, vec!["Water"]);
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipelines;
pub mod providers;
pub mod server;
pub mod store;

pub use chat::ChatAssistant;
pub use config::AppConfig;
pub use error::{PantryError, Result};
pub use model::{Ingredient, IngredientUpdate, NewIngredient, NewRecipe, Recipe};
pub use parser::parse_recipes;
pub use pipelines::{parse_recipe_file, IngestReport, RecipeFileIngestor};
pub use providers::{LlmProvider, ProviderFactory};
pub use store::{IngredientStore, RecipeStore, SqliteStore};

use std::path::Path;
use std::sync::Arc;

/// Parse the recipe file at `path` and store its recipes in `store`
pub async fn ingest_recipe_file(
    store: Arc<dyn RecipeStore>,
    path: impl AsRef<Path>,
) -> Result<IngestReport> {
    RecipeFileIngestor::new(store).ingest(path).await
}
