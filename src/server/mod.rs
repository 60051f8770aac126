//! HTTP surface of the service.

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use log::{error, info, warn};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;

use crate::chat::ChatAssistant;
use crate::config::AppConfig;
use crate::error::Result;
use crate::providers::ProviderFactory;
use crate::store::{IngredientStore, RecipeStore, SqliteStore};

use handlers::{chat, ingredients, recipes};

/// Collaborators shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<dyn RecipeStore>,
    pub ingredients: Arc<dyn IngredientStore>,
    /// `None` when no language model is configured; `/chat` then answers 503
    pub assistant: Option<Arc<ChatAssistant>>,
}

impl AppState {
    pub fn new<S>(store: S, assistant: Option<ChatAssistant>) -> Self
    where
        S: RecipeStore + IngredientStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            recipes: store.clone(),
            ingredients: store,
            assistant: assistant.map(Arc::new),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredients),
        )
        .route(
            "/ingredients/:id",
            get(ingredients::get_ingredient).put(ingredients::update_ingredient),
        )
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route("/recipes/parse-file", post(recipes::parse_file))
        .route("/chat", post(chat::chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the chat assistant from configuration, or `None` when the default
/// provider cannot be created (typically a missing API key)
pub fn build_assistant(config: &AppConfig) -> Option<ChatAssistant> {
    match ProviderFactory::get_default_provider(&config.ai) {
        Ok(provider) => {
            info!("Chat assistant using {}", provider.provider_name());
            Some(ChatAssistant::new(Arc::from(provider)))
        }
        Err(e) => {
            warn!("Chat assistant disabled: {}", e);
            None
        }
    }
}

/// Open the database, bind the listener, and serve until Ctrl+C or SIGTERM
pub async fn serve(config: AppConfig) -> Result<()> {
    info!("Initializing state...");
    let store = SqliteStore::open(&config.database.path)?;
    let state = AppState::new(store, build_assistant(&config));
    let app = create_router(state);

    let address = config.server.address();
    info!("Binding to {}", address);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
