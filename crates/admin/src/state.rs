//! Application state shared across handlers.

use sqlx::PgPool;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}
