//! Storage collaborators for recipes and ingredients.
//!
//! Handlers and the ingestion pipeline only see the [`RecipeStore`] and
//! [`IngredientStore`] traits; [`SqliteStore`] is the implementation the
//! server wires in.

mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::{PantryError, Result};
use crate::model::{Ingredient, IngredientUpdate, NewIngredient, NewRecipe, Recipe};

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe>;

    /// Insert a batch atomically: either every recipe is stored or none is
    async fn insert_recipes(&self, recipes: Vec<NewRecipe>) -> Result<Vec<Recipe>>;

    /// All recipes, oldest first
    async fn list_recipes(&self) -> Result<Vec<Recipe>>;
}

#[async_trait]
pub trait IngredientStore: Send + Sync {
    async fn insert_ingredient(&self, ingredient: NewIngredient) -> Result<Ingredient>;

    /// Insert a batch atomically: either every ingredient is stored or none is
    async fn insert_ingredients(&self, ingredients: Vec<NewIngredient>)
        -> Result<Vec<Ingredient>>;

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>>;

    async fn get_ingredient(&self, id: &str) -> Result<Option<Ingredient>>;

    /// Apply a partial update, returning the updated ingredient or `None`
    /// when `id` is unknown
    async fn update_ingredient(
        &self,
        id: &str,
        update: IngredientUpdate,
    ) -> Result<Option<Ingredient>>;
}

/// Names are the one required field for both recipes and ingredients
pub(crate) fn require_name(kind: &str, index: usize, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PantryError::Validation(format!(
            "{} at position {} is missing a name",
            kind, index
        )));
    }
    Ok(())
}
