//! Session-related types.

/// Session keys for customer data.
pub mod keys {
    /// Key for storing the Shopify cart ID.
    pub const CART_ID: &str = "cart_id";

    /// Key for one-shot notices shown on the next rendered page.
    pub const NOTICES: &str = "notices";
}
