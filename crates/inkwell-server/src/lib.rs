//! Inkwell server library logic.

pub mod api;
pub mod config;
pub mod pages;
pub mod seo;

use axum::{routing::get, Extension, Json, Router};
use config::{LoggingConfig, SiteConfig};
use inkwell_articles::ArticleSource;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where article rows come from.
    pub articles: Arc<dyn ArticleSource>,
    /// Site identity for page metadata.
    pub site: SiteConfig,
}

impl AppState {
    pub fn new(articles: Arc<dyn ArticleSource>, site: SiteConfig) -> Self {
        Self { articles, site }
    }
}

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Does not touch the
/// database.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(pages::home_handler))
        .route("/blog", get(pages::blog_handler))
        .route("/blog/{slug}", get(pages::article_handler))
        .route("/api/articles", get(api::list_articles_handler))
        .route("/api/articles/{slug}", get(api::get_article_handler))
        .fallback(pages::fallback_handler)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}

/// Installs the global tracing subscriber.
///
/// Falls back to `info` when the configured filter does not parse.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
