//! Settings database operations.
//!
//! Settings are stored one key per row with a JSONB value.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use order_value_bouncer_core::{BouncerSettings, CartMessage, MinimumAmount, keys};

use super::RepositoryError;

/// Get a setting value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_setting<'e>(
    executor: impl PgExecutor<'e>,
    key: &str,
) -> Result<Option<JsonValue>, RepositoryError> {
    let value = sqlx::query_scalar("SELECT value FROM bouncer.settings WHERE key = $1")
        .bind(key)
        .fetch_optional(executor)
        .await?;

    Ok(value)
}

/// Set a setting value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn set_setting<'e>(
    executor: impl PgExecutor<'e>,
    key: &str,
    value: &JsonValue,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO bouncer.settings (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
        ",
    )
    .bind(key)
    .bind(value)
    .execute(executor)
    .await?;

    Ok(())
}

/// When either bouncer setting was last written, if ever.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn last_updated(pool: &PgPool) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    let updated_at = sqlx::query_scalar(
        "SELECT MAX(updated_at) FROM bouncer.settings WHERE key = ANY($1)",
    )
    .bind([keys::MINIMUM, keys::MESSAGE].as_slice())
    .fetch_one(pool)
    .await?;

    Ok(updated_at)
}

/// Load the current configuration with defaults applied.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[instrument(skip(pool))]
pub async fn load_settings(pool: &PgPool) -> Result<BouncerSettings, RepositoryError> {
    let minimum = get_setting(pool, keys::MINIMUM).await?;
    let message = get_setting(pool, keys::MESSAGE).await?;

    if let Some(value) = &minimum
        && MinimumAmount::from_stored(value).is_none()
    {
        tracing::warn!(key = keys::MINIMUM, value = %value, "Invalid stored setting, using default");
    }
    if let Some(value) = &message
        && CartMessage::from_stored(value).is_none()
    {
        tracing::warn!(key = keys::MESSAGE, value = %value, "Invalid stored setting, using default");
    }

    Ok(BouncerSettings::from_stored(
        minimum.as_ref(),
        message.as_ref(),
    ))
}
