//! Catalog Admin Service
//!
//! Keeps the storefront's category tree in memory, applies add/edit/delete
//! intents through the storefront REST API and serves the rendered tree.

mod api;
mod client;
mod config;
mod errors;
mod models;
mod mutator;
mod render;
mod session;
mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::StorefrontClient;
use config::Config;
use mutator::TreeMutator;
use render::{render_outline, render_rows, Expansion};
use session::Session;
use store::CategoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub mutator: TreeMutator,
    pub expansion: Arc<RwLock<Expansion>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, errors::AppError> {
        let session = Session::with_token(config.api_token.clone());
        let client =
            StorefrontClient::new(&config.api_base_url, config.request_timeout, session)?;
        let store = Arc::new(RwLock::new(CategoryStore::new()));

        Ok(Self {
            mutator: TreeMutator::new(client, store),
            expansion: Arc::new(RwLock::new(Expansion::new())),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Catalog Admin Service");
    tracing::info!("Storefront API: {}", config.api_base_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_token.is_none() {
        tracing::warn!(
            "No storefront token configured (CATALOG_API_TOKEN). Log in via POST /api/session."
        );
    }

    let state = AppState::new(config.clone())?;

    // Initial load; the service stays up if the storefront is unavailable
    if config.api_token.is_some() {
        match state.mutator.load().await {
            Ok(_) => {
                let subtitles = state.mutator.count_descendants().await;
                let store = state.mutator.store().read().await;
                if store.is_empty() {
                    tracing::warn!("Storefront returned no categories");
                }
                tracing::info!(
                    "Category tree loaded: {} categories, {} subtitles",
                    store.len(),
                    subtitles
                );
                let rows = render_rows(store.categories(), &Expansion::new(), None);
                tracing::debug!("Category tree:\n{}", render_outline(&rows));
            }
            Err(e) => tracing::warn!("Initial category load failed: {}", e),
        }
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Session
        .route(
            "/session",
            get(api::get_session).post(api::login).delete(api::logout),
        )
        // Root categories
        .route(
            "/categories",
            get(api::list_categories).post(api::create_category),
        )
        .route("/categories/refresh", post(api::refresh_categories))
        .route("/categories/{id}/status", put(api::set_category_status))
        // Any node
        .route("/subtitles", post(api::create_subtitle))
        .route("/nodes", put(api::update_node).delete(api::delete_node))
        .route("/nodes/{id}/draft", get(api::get_node_draft))
        // Tree view
        .route("/tree", get(api::get_tree))
        .route("/tree/toggle/{id}", post(api::toggle_node))
        .route("/tree/expand-all", post(api::expand_all))
        .route("/tree/collapse-all", post(api::collapse_all))
        .route("/stats", get(api::get_stats));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
