//! Replaces the blog's authors and articles with the built-in demo set.
//!
//! Usage: `inkwell-seed [config.toml]`. Reads the same configuration and
//! environment overrides as the server, applies pending migrations, then
//! seeds inside a single transaction.

use inkwell_server::config::{self, resolve_config_path};
use inkwell_server::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let (resolved_config_path, _) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = match config::load_config(selected_config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    let pool = match inkwell_db::create_pool(
        config.database.url.as_deref().unwrap_or_default(),
        &config.database.runtime_settings(),
    ) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to create database pool");
            return ExitCode::FAILURE;
        }
    };

    let result = async {
        let applied = inkwell_db::run_migrations(&pool).await?;
        if applied > 0 {
            tracing::info!(count = applied, "applied database migrations");
        }
        let summary = inkwell_db::seed::seed(&pool).await?;
        Ok::<_, Box<dyn std::error::Error>>(summary)
    }
    .await;

    pool.close().await;

    match result {
        Ok(summary) => {
            tracing::info!(
                authors = summary.authors,
                articles = summary.articles,
                drafts = summary.drafts,
                "seeding complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "seeding failed");
            ExitCode::FAILURE
        }
    }
}
