use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{require_name, schema, IngredientStore, RecipeStore};
use crate::error::{PantryError, Result};
use crate::model::{Ingredient, IngredientUpdate, NewIngredient, NewRecipe, Recipe};

const RECIPE_COLUMNS: &str = "id, name, ingredients, instructions, taste, cuisine, prep_time";
const INGREDIENT_COLUMNS: &str = "id, name, quantity, unit, expiry_date";

/// Recipe and ingredient store backed by a single SQLite connection.
///
/// Every call runs on the blocking thread pool; the connection is shared
/// behind a mutex so clones of the store talk to the same database.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and migrate it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// A private, throwaway database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        schema::migrate(&conn)?;
        Ok(SqliteStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| PantryError::StoreUnavailable("database lock poisoned".to_string()))?;
            f(&mut *conn)
        })
        .await
        .map_err(|e| PantryError::StoreUnavailable(format!("database task failed: {}", e)))?
    }
}

fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let ingredients: String = row.get(2)?;
    let ingredients = serde_json::from_str(&ingredients)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(Recipe {
        id: row.get(0)?,
        name: row.get(1)?,
        ingredients,
        instructions: row.get(3)?,
        taste: row.get(4)?,
        cuisine: row.get(5)?,
        prep_time: row.get(6)?,
    })
}

fn ingredient_from_row(row: &Row<'_>) -> rusqlite::Result<Ingredient> {
    let expiry_date: Option<String> = row.get(4)?;
    let expiry_date = expiry_date
        .map(|date| {
            DateTime::parse_from_rfc3339(&date)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))
        })
        .transpose()?;

    Ok(Ingredient {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
        expiry_date,
    })
}

fn find_ingredient(conn: &Connection, id: &str) -> Result<Option<Ingredient>> {
    let ingredient = conn
        .query_row(
            &format!("SELECT {} FROM ingredients WHERE id = ?1", INGREDIENT_COLUMNS),
            [id],
            ingredient_from_row,
        )
        .optional()?;
    Ok(ingredient)
}

#[async_trait]
impl RecipeStore for SqliteStore {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe> {
        self.insert_recipes(vec![recipe])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PantryError::StoreUnavailable("insert returned no recipe".to_string()))
    }

    async fn insert_recipes(&self, recipes: Vec<NewRecipe>) -> Result<Vec<Recipe>> {
        self.with_conn(move |conn| {
            for (index, recipe) in recipes.iter().enumerate() {
                require_name("Recipe", index, &recipe.name)?;
            }

            let tx = conn.transaction()?;
            let mut stored = Vec::with_capacity(recipes.len());
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT INTO recipes ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    RECIPE_COLUMNS
                ))?;
                for recipe in recipes {
                    let id = Uuid::new_v4().to_string();
                    let ingredients = serde_json::to_string(&recipe.ingredients)?;
                    stmt.execute(params![
                        id,
                        recipe.name,
                        ingredients,
                        recipe.instructions,
                        recipe.taste,
                        recipe.cuisine,
                        recipe.prep_time
                    ])?;
                    stored.push(Recipe::from_new(id, recipe));
                }
            }
            tx.commit()?;

            debug!("Stored {} recipes", stored.len());
            Ok(stored)
        })
        .await
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM recipes ORDER BY seq",
                RECIPE_COLUMNS
            ))?;
            let recipes = stmt
                .query_map([], recipe_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(recipes)
        })
        .await
    }
}

#[async_trait]
impl IngredientStore for SqliteStore {
    async fn insert_ingredient(&self, ingredient: NewIngredient) -> Result<Ingredient> {
        self.insert_ingredients(vec![ingredient])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PantryError::StoreUnavailable("insert returned no ingredient".to_string())
            })
    }

    async fn insert_ingredients(
        &self,
        ingredients: Vec<NewIngredient>,
    ) -> Result<Vec<Ingredient>> {
        self.with_conn(move |conn| {
            for (index, ingredient) in ingredients.iter().enumerate() {
                require_name("Ingredient", index, &ingredient.name)?;
            }

            let tx = conn.transaction()?;
            let mut stored = Vec::with_capacity(ingredients.len());
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT INTO ingredients ({}) VALUES (?1, ?2, ?3, ?4, ?5)",
                    INGREDIENT_COLUMNS
                ))?;
                for ingredient in ingredients {
                    let id = Uuid::new_v4().to_string();
                    stmt.execute(params![
                        id,
                        ingredient.name,
                        ingredient.quantity,
                        ingredient.unit,
                        ingredient.expiry_date.map(|date| date.to_rfc3339())
                    ])?;
                    stored.push(Ingredient::from_new(id, ingredient));
                }
            }
            tx.commit()?;

            debug!("Stored {} ingredients", stored.len());
            Ok(stored)
        })
        .await
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM ingredients ORDER BY seq",
                INGREDIENT_COLUMNS
            ))?;
            let ingredients = stmt
                .query_map([], ingredient_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(ingredients)
        })
        .await
    }

    async fn get_ingredient(&self, id: &str) -> Result<Option<Ingredient>> {
        let id = id.to_string();
        self.with_conn(move |conn| find_ingredient(conn, &id)).await
    }

    async fn update_ingredient(
        &self,
        id: &str,
        update: IngredientUpdate,
    ) -> Result<Option<Ingredient>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let Some(mut ingredient) = find_ingredient(&tx, &id)? else {
                return Ok(None);
            };

            ingredient.apply(update);
            require_name("Ingredient", 0, &ingredient.name)?;

            tx.execute(
                "UPDATE ingredients SET name = ?2, quantity = ?3, unit = ?4, expiry_date = ?5
                 WHERE id = ?1",
                params![
                    ingredient.id,
                    ingredient.name,
                    ingredient.quantity,
                    ingredient.unit,
                    ingredient.expiry_date.map(|date| date.to_rfc3339())
                ],
            )?;
            tx.commit()?;

            Ok(Some(ingredient))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str) -> NewRecipe {
        NewRecipe {
            name: name.to_string(),
            ingredients: vec!["Flour".to_string(), "Milk".to_string()],
            instructions: "Mix\nCook".to_string(),
            ..Default::default()
        }
    }

    fn ingredient(name: &str) -> NewIngredient {
        NewIngredient {
            name: name.to_string(),
            quantity: Some("500".to_string()),
            unit: Some("g".to_string()),
            expiry_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_recipes() {
        let store = SqliteStore::open_in_memory().unwrap();

        let stored = store
            .insert_recipes(vec![recipe("Pancakes"), recipe("Crepes")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert_ne!(stored[0].id, stored[1].id);

        let listed = store.list_recipes().await.unwrap();
        assert_eq!(listed, stored);
        assert_eq!(listed[0].ingredients, vec!["Flour", "Milk"]);
        assert_eq!(listed[0].instructions, "Mix\nCook");
    }

    #[tokio::test]
    async fn test_batch_with_empty_name_is_rejected_whole() {
        let store = SqliteStore::open_in_memory().unwrap();

        let result = store
            .insert_recipes(vec![recipe("Pancakes"), recipe(""), recipe("Tea")])
            .await;
        assert!(matches!(result, Err(PantryError::Validation(_))));
        assert!(store.list_recipes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let store = SqliteStore::open_in_memory().unwrap();
        let stored = store.insert_recipes(Vec::new()).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_insert_single_recipe() {
        let store = SqliteStore::open_in_memory().unwrap();
        let stored = store.insert_recipe(recipe("Soup")).await.unwrap();
        assert_eq!(stored.name, "Soup");
        assert_eq!(store.list_recipes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ingredient_roundtrip_and_update() {
        let store = SqliteStore::open_in_memory().unwrap();

        let mut milk = ingredient("Milk");
        milk.expiry_date = Some("2024-12-31T00:00:00Z".parse().unwrap());
        let stored = store.insert_ingredient(milk).await.unwrap();

        let fetched = store.get_ingredient(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);

        let updated = store
            .update_ingredient(
                &stored.id,
                IngredientUpdate {
                    quantity: Some(Some("750".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity.as_deref(), Some("750"));
        assert_eq!(updated.unit.as_deref(), Some("g"));
        assert_eq!(updated.expiry_date, stored.expiry_date);

        let fetched = store.get_ingredient(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_null_clears_expiry_date() {
        let store = SqliteStore::open_in_memory().unwrap();

        let mut milk = ingredient("Milk");
        milk.expiry_date = Some("2024-12-31T00:00:00Z".parse().unwrap());
        let stored = store.insert_ingredient(milk).await.unwrap();

        let update: IngredientUpdate = serde_json::from_str(r#"{"expiryDate": null}"#).unwrap();
        let updated = store
            .update_ingredient(&stored.id, update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.expiry_date, None);
        assert_eq!(updated.unit.as_deref(), Some("g"));

        let fetched = store.get_ingredient(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.expiry_date, None);
    }

    #[tokio::test]
    async fn test_update_null_name_is_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let stored = store.insert_ingredient(ingredient("Salt")).await.unwrap();

        let update: IngredientUpdate = serde_json::from_str(r#"{"name": null}"#).unwrap();
        let result = store.update_ingredient(&stored.id, update).await;
        assert!(matches!(result, Err(PantryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_ingredient() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_ingredient("nope").await.unwrap().is_none());

        let updated = store
            .update_ingredient("nope", IngredientUpdate::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_cannot_clear_name() {
        let store = SqliteStore::open_in_memory().unwrap();
        let stored = store.insert_ingredient(ingredient("Salt")).await.unwrap();

        let result = store
            .update_ingredient(
                &stored.id,
                IngredientUpdate {
                    name: Some(Some(String::new())),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(PantryError::Validation(_))));

        let fetched = store.get_ingredient(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Salt");
    }

    #[tokio::test]
    async fn test_bulk_ingredients() {
        let store = SqliteStore::open_in_memory().unwrap();
        let stored = store
            .insert_ingredients(vec![ingredient("Eggs"), ingredient("Butter")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);

        let names: Vec<String> = store
            .list_ingredients()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Eggs", "Butter"]);
    }
}
