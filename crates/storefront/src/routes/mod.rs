//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//! GET  /cart                   - Cart page (fires check_cart_items)
//! GET  /checkout               - Redirect to Shopify checkout (fires before_checkout_process)
//! ```

pub mod cart;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(cart::CART_PATH, get(cart::show))
        .route("/checkout", get(cart::checkout))
}
