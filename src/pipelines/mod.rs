pub mod file;

pub use file::{parse_recipe_file, IngestReport, RecipeFileIngestor};
