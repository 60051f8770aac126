use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing, storing, or chatting about recipes
#[derive(Error, Debug)]
pub enum PantryError {
    /// The given path could not be turned into an absolute path
    #[error("Failed to resolve path '{path}': {source}")]
    PathResolution {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The recipe file could not be read (missing, permission denied, not UTF-8)
    #[error("Failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database rejected an operation
    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// The store could not be reached at all
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A record violates a required-field constraint
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The language model returned an error or an unusable response
    #[error("Language model request failed: {0}")]
    Provider(String),

    /// No language model provider is configured
    #[error("Language model provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Failed to reach the language model API
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PantryError {
    /// Stable category name, used when reporting failures
    pub fn category(&self) -> &'static str {
        match self {
            PantryError::PathResolution { .. } => "path_resolution",
            PantryError::FileRead { .. } => "file_read",
            PantryError::Persistence(_) | PantryError::StoreUnavailable(_) => "persistence",
            PantryError::Validation(_) => "validation",
            PantryError::Provider(_) | PantryError::Http(_) => "provider",
            PantryError::ProviderUnavailable(_) => "provider_unavailable",
            PantryError::Config(_) => "config",
            PantryError::Serialization(_) => "serialization",
            PantryError::Io(_) => "io",
        }
    }
}

pub type Result<T, E = PantryError> = std::result::Result<T, E>;
