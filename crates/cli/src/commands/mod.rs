//! `ph-cli` subcommands.

pub mod migrate;
pub mod supplier;
pub mod verify;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] pharmahub_api::db::RepositoryError),

    /// Invalid command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Connect to the marketplace database.
///
/// Reads `PHARMAHUB_DATABASE_URL`, falling back to `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PHARMAHUB_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("PHARMAHUB_DATABASE_URL"))?;

    tracing::info!("Connecting to marketplace database...");
    Ok(PgPool::connect(database_url.expose_secret()).await?)
}
