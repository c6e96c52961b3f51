//! Database migration command.
//!
//! # Environment Variables
//!
//! - `BOUNCER_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/admin/migrations/` and are embedded at build time.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

const DATABASE_URL_VAR: &str = "BOUNCER_DATABASE_URL";

fn database_url() -> Result<SecretString, MigrationError> {
    std::env::var(DATABASE_URL_VAR)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar(DATABASE_URL_VAR))
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails, or
/// a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let _ = dotenvy::dotenv();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
