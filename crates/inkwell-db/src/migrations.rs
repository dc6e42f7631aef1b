//! Embedded SQL migration runner.
//!
//! Migrations are SQL files embedded at compile time. They run sequentially
//! on startup, tracked by the `_inkwell_migrations` table. Each migration
//! runs exactly once; already applied migrations are skipped.

use sqlx::PgPool;
use thiserror::Error;

/// A single embedded migration.
struct Migration {
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. New migrations are appended here.
const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "001_authors",
        sql: include_str!("migrations/001_authors.sql"),
    },
    Migration {
        name: "002_articles",
        sql: include_str!("migrations/002_articles.sql"),
    },
    Migration {
        name: "003_articles_published_index",
        sql: include_str!("migrations/003_articles_published_index.sql"),
    },
];

/// Errors that can occur during migration execution.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A SQL statement within a migration failed.
    #[error("migration '{name}' failed: {source}")]
    ExecutionFailed {
        /// The name of the migration that failed.
        name: String,
        /// The underlying database error.
        source: sqlx::Error,
    },

    /// Failed to query migration state.
    #[error("failed to check migration state: {0}")]
    StateQuery(sqlx::Error),
}

/// Runs all pending migrations against the given pool.
///
/// Migrations that have already been applied (tracked in
/// `_inkwell_migrations`) are skipped. New migrations are applied in order,
/// each inside its own transaction together with its tracking row.
///
/// # Errors
///
/// Returns `MigrationError` if any migration fails to execute or if the
/// migration tracking table cannot be queried.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, MigrationError> {
    run_migrations_from_list(pool, MIGRATIONS).await
}

async fn run_migrations_from_list(
    pool: &PgPool,
    migrations: &[Migration],
) -> Result<usize, MigrationError> {
    sqlx::raw_sql(
        "CREATE TABLE IF NOT EXISTS _inkwell_migrations (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );",
    )
    .execute(pool)
    .await
    .map_err(|e| MigrationError::ExecutionFailed {
        name: "_inkwell_migrations_bootstrap".to_string(),
        source: e,
    })?;

    let mut applied = 0;

    for migration in migrations {
        let already_applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM _inkwell_migrations WHERE name = $1)",
        )
        .bind(migration.name)
        .fetch_one(pool)
        .await
        .map_err(MigrationError::StateQuery)?;

        if already_applied {
            tracing::debug!(
                migration = migration.name,
                "migration already applied, skipping"
            );
            continue;
        }

        tracing::info!(migration = migration.name, "applying migration");

        let failed = |e: sqlx::Error| MigrationError::ExecutionFailed {
            name: migration.name.to_string(),
            source: e,
        };

        let mut tx = pool.begin().await.map_err(failed)?;

        sqlx::raw_sql(migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;

        sqlx::query("INSERT INTO _inkwell_migrations (name) VALUES ($1)")
            .bind(migration.name)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;

        tx.commit().await.map_err(failed)?;

        applied += 1;
    }

    Ok(applied)
}

/// Names of all embedded migrations, in application order.
pub fn migration_names() -> impl Iterator<Item = &'static str> {
    MIGRATIONS.iter().map(|m| m.name)
}
