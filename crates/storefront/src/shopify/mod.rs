//! Shopify Storefront API client for cart totals.
//!
//! # Architecture
//!
//! - Shopify owns the cart; this service only reads it
//! - Totals are never cached: every cart view and checkout attempt fetches
//!   the live cart
//! - Requests use the `graphql_client` query envelope over `reqwest` 0.13
//!
//! # Example
//!
//! ```rust,ignore
//! use order_value_bouncer_storefront::shopify::CartClient;
//!
//! let client = CartClient::new(&config.shopify);
//! let cart = client.get_cart(&cart_id).await?;
//! println!("total: {}", cart.total.amount);
//! ```

mod client;
pub mod types;

pub use client::CartClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    pub path: Vec<String>,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| {
            if e.path.is_empty() {
                e.message.clone()
            } else {
                format!("{} (at {})", e.message, e.path.join("."))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
