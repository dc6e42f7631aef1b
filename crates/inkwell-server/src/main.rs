//! Inkwell server binary.
//!
//! Starts an axum HTTP server with structured logging, a lazily connected
//! PostgreSQL pool, optional migrations, and graceful shutdown on
//! SIGTERM/SIGINT.

use inkwell_articles::PgArticleSource;
use inkwell_server::config::{self, resolve_config_path};
use inkwell_server::{app, init_tracing, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration; the server cannot start without valid config");

    init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // Initialize database
    let pool = inkwell_db::create_pool(
        config.database.url.as_deref().unwrap_or_default(),
        &config.database.runtime_settings(),
    )
    .expect("failed to create database pool; set POSTGRES_URL to a postgres:// URL");

    if config.database.run_migrations {
        match inkwell_db::run_migrations(&pool).await {
            Ok(0) => tracing::debug!("database schema is up to date"),
            Ok(applied) => tracing::info!(count = applied, "applied database migrations"),
            // The database may come up later; reads degrade to empty results meanwhile.
            Err(e) => tracing::error!(error = %e, "failed to run database migrations"),
        }
    }

    let state = AppState::new(
        Arc::new(PgArticleSource::new(pool.clone())),
        config.site.clone(),
    );
    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, "starting inkwell server");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address; is another process using this port?");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    pool.close().await;
    tracing::info!("inkwell server shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
