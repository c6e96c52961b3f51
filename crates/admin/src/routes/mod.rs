//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Health check
//! GET  /health/ready             - Readiness check (database)
//! GET  /settings/minimum-order   - Minimum order settings page (manage_options)
//! POST /settings/minimum-order   - Save minimum order settings (manage_options)
//! ```
//!
//! Sign-in lives on the host at `/auth/login`.

pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new().merge(settings::router())
}
