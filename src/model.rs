use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A recipe that has not been stored yet.
///
/// This is what the text-file parser produces and what `POST /recipes`
/// accepts. Everything but `name` falls back to an empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub taste: String,
    #[serde(default)]
    pub cuisine: String,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: u32,
}

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub taste: String,
    pub cuisine: String,
    pub prep_time: u32,
}

impl Recipe {
    pub fn from_new(id: String, recipe: NewRecipe) -> Self {
        Recipe {
            id,
            name: recipe.name,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            taste: recipe.taste,
            cuisine: recipe.cuisine,
            prep_time: recipe.prep_time,
        }
    }
}

/// An ingredient that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

/// A stored ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl Ingredient {
    pub fn from_new(id: String, ingredient: NewIngredient) -> Self {
        Ingredient {
            id,
            name: ingredient.name,
            quantity: ingredient.quantity,
            unit: ingredient.unit,
            expiry_date: ingredient.expiry_date,
        }
    }

    /// Overwrite every field present in `update`, keep the rest.
    ///
    /// An explicit `null` clears the field. A `null` name becomes empty and
    /// is rejected by the store.
    pub fn apply(&mut self, update: IngredientUpdate) {
        if let Some(name) = update.name {
            self.name = name.unwrap_or_default();
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(expiry_date) = update.expiry_date {
            self.expiry_date = expiry_date;
        }
    }
}

/// Partial ingredient update.
///
/// Each field is `None` when the key is absent and `Some(None)` when the
/// body sends `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUpdate {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub expiry_date: Option<Option<DateTime<Utc>>>,
}

/// Marks a key as present, keeping `null` distinct from a missing key
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recipe_defaults() {
        let recipe: NewRecipe = serde_json::from_str(r#"{"name": "Toast"}"#).unwrap();
        assert_eq!(recipe.name, "Toast");
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.instructions, "");
        assert_eq!(recipe.prep_time, 0);
    }

    #[test]
    fn test_recipe_wire_names() {
        let recipe = Recipe::from_new(
            "abc".to_string(),
            NewRecipe {
                name: "Soup".to_string(),
                prep_time: 15,
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["prepTime"], 15);
        assert!(json.get("prep_time").is_none());
    }

    #[test]
    fn test_ingredient_partial_update() {
        let mut ingredient = Ingredient::from_new(
            "1".to_string(),
            NewIngredient {
                name: "Flour".to_string(),
                quantity: Some("500".to_string()),
                unit: Some("g".to_string()),
                expiry_date: None,
            },
        );

        let update: IngredientUpdate = serde_json::from_str(r#"{"quantity": "750"}"#).unwrap();
        ingredient.apply(update);

        assert_eq!(ingredient.name, "Flour");
        assert_eq!(ingredient.quantity.as_deref(), Some("750"));
        assert_eq!(ingredient.unit.as_deref(), Some("g"));
    }

    #[test]
    fn test_ingredient_update_null_clears() {
        let mut ingredient = Ingredient::from_new(
            "1".to_string(),
            NewIngredient {
                name: "Milk".to_string(),
                quantity: Some("1".to_string()),
                unit: Some("l".to_string()),
                expiry_date: Some("2024-12-31T00:00:00Z".parse().unwrap()),
            },
        );

        let update: IngredientUpdate =
            serde_json::from_str(r#"{"expiryDate": null, "unit": null}"#).unwrap();
        assert_eq!(update.expiry_date, Some(None));
        assert_eq!(update.quantity, None);
        ingredient.apply(update);

        assert_eq!(ingredient.expiry_date, None);
        assert_eq!(ingredient.unit, None);
        assert_eq!(ingredient.quantity.as_deref(), Some("1"));
    }

    #[test]
    fn test_ingredient_update_null_name_empties_it() {
        let mut ingredient = Ingredient::from_new(
            "1".to_string(),
            NewIngredient {
                name: "Milk".to_string(),
                ..Default::default()
            },
        );
        let update: IngredientUpdate = serde_json::from_str(r#"{"name": null}"#).unwrap();
        ingredient.apply(update);
        assert_eq!(ingredient.name, "");
    }

    #[test]
    fn test_ingredient_expiry_date_parses() {
        let ingredient: NewIngredient =
            serde_json::from_str(r#"{"name": "Milk", "expiryDate": "2024-12-31T00:00:00Z"}"#)
                .unwrap();
        assert!(ingredient.expiry_date.is_some());
    }
}
