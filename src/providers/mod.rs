mod factory;
mod google;
mod open_ai;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use log::debug;
use reqwest::Response;
use serde_json::Value;

use crate::error::{PantryError, Result};

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send a single prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Decode a provider response, turning HTTP errors into `Provider` errors
pub(crate) async fn read_json(provider: &str, response: Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PantryError::Provider(format!(
            "{} returned {}: {}",
            provider, status, body
        )));
    }

    let body: Value = response.json().await?;
    debug!("{} response: {:?}", provider, body);
    Ok(body)
}
