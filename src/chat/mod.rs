//! Cooking suggestions from a language model.

mod prompt;

pub use prompt::{build_chat_prompt, describe_recipe, ASSISTANT_PROMPT};

use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::model::{Ingredient, Recipe};
use crate::providers::LlmProvider;

/// Answers user messages using the stored recipes and ingredients as context
pub struct ChatAssistant {
    provider: Arc<dyn LlmProvider>,
}

impl ChatAssistant {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub async fn reply(
        &self,
        message: &str,
        recipes: &[Recipe],
        ingredients: &[Ingredient],
    ) -> Result<String> {
        info!(
            "Asking {} for suggestions ({} recipes, {} ingredients)",
            self.provider.provider_name(),
            recipes.len(),
            ingredients.len()
        );

        let prompt = build_chat_prompt(message, recipes, ingredients);
        self.provider.generate(&prompt).await
    }
}
