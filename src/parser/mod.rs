//! Plain-text recipe parser.
//!
//! The format is a convention rather than a grammar: recipes are separated by
//! a blank line, the first line of a recipe is its name, and the optional
//! `Ingredients:` and `Instructions:` headers introduce one item per line.
//!
//! ```text
//! Pancakes
//! Ingredients:
//! Flour
//! Milk
//! Instructions:
//! Mix ingredients
//! Cook on griddle
//!
//! Tea
//! Ingredients:
//! Tea leaves
//! Instructions:
//! Steep leaves
//! ```
//!
//! Parsing runs in three stages: [`segment`] splits the file into blocks,
//! [`extract`] sorts the lines of one block into sections, and [`normalize`]
//! builds the [`NewRecipe`] that gets stored.

mod extractor;
mod normalizer;
mod segmenter;

pub use extractor::{extract, ExtractedFields, Section};
pub use normalizer::normalize;
pub use segmenter::{segment, Blocks};

use log::debug;

use crate::model::NewRecipe;

/// Parse every recipe in `content`.
///
/// Blocks that are empty after trimming are skipped, so blank runs and
/// trailing blank lines never turn into nameless recipes.
pub fn parse_recipes(content: &str) -> Vec<NewRecipe> {
    let blocks = segment(content);
    blocks
        .iter()
        .filter(|block| !block.is_empty())
        .map(|block| {
            let recipe = normalize(extract(block));
            debug!(
                "Parsed recipe '{}' ({} ingredients)",
                recipe.name,
                recipe.ingredients.len()
            );
            recipe
        })
        .collect()
}
