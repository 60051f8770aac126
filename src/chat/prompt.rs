use crate::model::{Ingredient, Recipe};

/// Opening instruction for the cooking assistant.
///
/// Loaded from `prompt.txt` at compile time.
pub const ASSISTANT_PROMPT: &str = include_str!("prompt.txt");

const CLOSING_INSTRUCTION: &str = "Please suggest appropriate recipes from the available ones, considering the available ingredients, and explain why they match the user's request.";

/// One recipe as the model sees it
pub fn describe_recipe(recipe: &Recipe) -> String {
    format!(
        "Recipe: {}\nIngredients: {}\nTaste: {}\nCuisine: {}\nPrep Time: {} minutes",
        recipe.name,
        recipe.ingredients.join(", "),
        recipe.taste,
        recipe.cuisine,
        recipe.prep_time
    )
}

/// Full prompt: pantry contents, recipe book, then the user's request
pub fn build_chat_prompt(message: &str, recipes: &[Recipe], ingredients: &[Ingredient]) -> String {
    let available_ingredients = ingredients
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let recipe_context = recipes
        .iter()
        .map(describe_recipe)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\n\nAvailable Ingredients:\n{}\n\nAvailable Recipes:\n{}\n\nUser Request: {}\n\n{}",
        ASSISTANT_PROMPT.trim_end(),
        available_ingredients,
        recipe_context,
        message,
        CLOSING_INSTRUCTION
    )
}
