//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! ph-cli migrate
//! ```
//!
//! Applies `crates/api/migrations/` and then creates the tower-sessions
//! table used for carts.

use tower_sessions_sqlx_store::PostgresStore;

use super::{CliError, connect};

/// Run marketplace and session store migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running marketplace migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
