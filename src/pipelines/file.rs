use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;

use crate::error::{PantryError, Result};
use crate::model::{NewRecipe, Recipe};
use crate::parser::parse_recipes;
use crate::store::RecipeStore;

/// Outcome of one file ingestion
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub count: usize,
    pub recipes: Vec<Recipe>,
}

/// Reads a plain-text recipe file and stores every recipe in it
pub struct RecipeFileIngestor {
    store: Arc<dyn RecipeStore>,
}

impl RecipeFileIngestor {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Parse the file at `path` and store all of its recipes in one batch.
    ///
    /// Nothing is stored unless every recipe is accepted. Running this twice
    /// on the same file stores the recipes twice.
    pub async fn ingest(&self, path: impl AsRef<Path>) -> Result<IngestReport> {
        let recipes = parse_recipe_file(path).await?;

        let recipes = self.store.insert_recipes(recipes).await?;
        info!("Stored {} parsed recipes", recipes.len());

        Ok(IngestReport {
            count: recipes.len(),
            recipes,
        })
    }
}

/// Resolve, read, and parse a recipe file without storing anything
pub async fn parse_recipe_file(path: impl AsRef<Path>) -> Result<Vec<NewRecipe>> {
    let path = resolve(path.as_ref())?;
    debug!("Reading recipe file {}", path.display());

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| PantryError::FileRead {
            path: path.clone(),
            source,
        })?;

    let recipes = parse_recipes(&content);
    info!("Parsed {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

fn resolve(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| PantryError::PathResolution {
        path: path.display().to_string(),
        source,
    })
}
