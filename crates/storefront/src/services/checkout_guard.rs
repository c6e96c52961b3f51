//! Minimum order enforcement at the checkout lifecycle points.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use order_value_bouncer_core::{
    BouncerSettings, CheckoutEvent, CheckoutSnapshot, HookFlow, LifecycleHooks,
};

use crate::db::{RepositoryError, SettingsRepository};

/// Runs lifecycle hooks against the stored configuration.
///
/// Settings are read on every call so admin changes apply to the next request.
pub struct CheckoutGuard<'a> {
    pool: &'a PgPool,
    hooks: &'a LifecycleHooks,
}

impl<'a> CheckoutGuard<'a> {
    /// Create a guard over the given pool and hook table.
    #[must_use]
    pub const fn new(pool: &'a PgPool, hooks: &'a LifecycleHooks) -> Self {
        Self { pool, hooks }
    }

    /// Fire `event` for a cart with the given total.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the settings cannot be loaded.
    #[instrument(skip(self), fields(event = %event))]
    pub async fn run(
        &self,
        event: CheckoutEvent,
        cart_total: Decimal,
    ) -> Result<HookFlow, RepositoryError> {
        let settings = SettingsRepository::new(self.pool).load().await?;
        Ok(evaluate(self.hooks, event, settings, cart_total))
    }
}

/// Dispatch `event` for one snapshot, logging blocks.
#[must_use]
pub fn evaluate(
    hooks: &LifecycleHooks,
    event: CheckoutEvent,
    settings: BouncerSettings,
    cart_total: Decimal,
) -> HookFlow {
    let snapshot = CheckoutSnapshot::new(settings, cart_total);
    let flow = hooks.dispatch(event, &snapshot);

    if flow.is_halt() {
        tracing::info!(
            event = %event,
            total = %cart_total,
            minimum = %snapshot.settings.minimum_amount,
            "Cart below minimum order amount"
        );
    }

    flow
}
