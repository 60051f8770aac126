use super::extractor::ExtractedFields;
use crate::model::NewRecipe;

/// Turn extracted fields into a storable recipe.
///
/// Instruction lines are joined with `\n`. Taste and cuisine are never
/// present in the text format, so they stay empty and the prep time stays 0.
pub fn normalize(fields: ExtractedFields) -> NewRecipe {
    NewRecipe {
        name: fields.name,
        ingredients: fields.ingredients,
        instructions: fields.instructions.join("\n"),
        taste: String::new(),
        cuisine: String::new(),
        prep_time: 0,
    }
}
