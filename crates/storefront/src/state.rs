//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use order_value_bouncer_core::LifecycleHooks;

use crate::config::StorefrontConfig;
use crate::shopify::CartClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the Shopify client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    carts: CartClient,
    hooks: LifecycleHooks,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The lifecycle hook table is built here, once, with the minimum order
    /// rule subscribed to both checkout events.
    #[must_use]
    pub fn new(config: &StorefrontConfig, pool: PgPool) -> Self {
        let carts = CartClient::new(&config.shopify);

        Self {
            inner: Arc::new(AppStateInner {
                pool,
                carts,
                hooks: LifecycleHooks::minimum_order(),
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Shopify cart client.
    #[must_use]
    pub fn carts(&self) -> &CartClient {
        &self.inner.carts
    }

    /// Get a reference to the lifecycle hook table.
    #[must_use]
    pub fn hooks(&self) -> &LifecycleHooks {
        &self.inner.hooks
    }
}
