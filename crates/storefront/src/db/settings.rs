//! Read access to the minimum order configuration.

use std::collections::HashMap;

use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tracing::instrument;

use order_value_bouncer_core::{BouncerSettings, CartMessage, MinimumAmount, keys};

use super::RepositoryError;

/// Repository for the bouncer settings rows.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the current configuration.
    ///
    /// Missing keys fall back to their defaults. Rows that cannot be decoded
    /// also fall back, with a warning.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<BouncerSettings, RepositoryError> {
        let rows: Vec<(String, JsonValue)> =
            sqlx::query_as("SELECT key, value FROM bouncer.settings WHERE key = ANY($1)")
                .bind([keys::MINIMUM, keys::MESSAGE].as_slice())
                .fetch_all(self.pool)
                .await?;

        let stored: HashMap<String, JsonValue> = rows.into_iter().collect();
        Ok(decode_settings(&stored))
    }
}

/// Build settings from stored rows, warning about rows that do not decode.
fn decode_settings(stored: &HashMap<String, JsonValue>) -> BouncerSettings {
    let minimum = stored.get(keys::MINIMUM);
    let message = stored.get(keys::MESSAGE);

    if let Some(value) = minimum
        && MinimumAmount::from_stored(value).is_none()
    {
        tracing::warn!(key = keys::MINIMUM, value = %value, "Invalid stored setting, using default");
    }

    if let Some(value) = message
        && CartMessage::from_stored(value).is_none()
    {
        tracing::warn!(key = keys::MESSAGE, value = %value, "Invalid stored setting, using default");
    }

    BouncerSettings::from_stored(minimum, message)
}
