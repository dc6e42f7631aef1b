//! Database layer for the Inkwell blog.
//!
//! Provides PostgreSQL connection pooling (via `sqlx`), connection-string
//! validation, embedded SQL migrations, and the seeding routine that fills
//! a fresh database with demo authors and articles.
//!
//! # Design decisions
//!
//! - **Explicit pool handle**: [`create_pool`] returns a pool that the
//!   caller owns and passes down. Nothing in the workspace reaches for a
//!   process-wide singleton.
//! - **Lazy connections**: the pool is built without opening a connection,
//!   so a database outage at startup surfaces as failed queries rather than
//!   a crashed process. Configuration mistakes (bad scheme, unparseable URL)
//!   still fail immediately.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!` and tracked in `_inkwell_migrations`.

mod migrations;
mod pool;
pub mod seed;

pub use migrations::{migration_names, run_migrations, MigrationError};
pub use pool::{
    create_pool, resolve_connection_string, DbPool, DbRuntimeSettings, PoolError,
    DATABASE_URL_ENV,
};
