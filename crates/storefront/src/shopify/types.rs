//! Cart types for the Shopify Storefront API.
//!
//! The `Raw*` types mirror the GraphQL response shape; the public types are
//! what the rest of the storefront works with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Format for display (e.g., "49.99 USD").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.2} {}", self.amount, self.currency_code)
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// A cart line as shown on the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Cart line ID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Variant title, `None` for single-variant products.
    pub variant_title: Option<String>,
    /// Quantity of this line.
    pub quantity: u32,
    /// Total cost of this line.
    pub total: Money,
}

/// The cart fields the storefront needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Shopify cart ID.
    pub id: String,
    /// Shopify-hosted checkout URL.
    pub checkout_url: String,
    /// Total number of items.
    pub total_quantity: u32,
    /// Cart total, as computed by Shopify.
    pub total: Money,
    /// Cart lines.
    pub lines: Vec<CartLine>,
}

impl CartSummary {
    /// Whether the cart has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_quantity == 0
    }
}

// =============================================================================
// GraphQL Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct GetCartData {
    pub cart: Option<RawCart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawCart {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: i64,
    pub cost: RawCartCost,
    pub lines: RawCartLines,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawCartCost {
    pub total_amount: Money,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawCartLines {
    pub nodes: Vec<RawCartLine>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawCartLine {
    pub id: String,
    pub quantity: i64,
    pub cost: RawCartCost,
    pub merchandise: RawMerchandise,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawMerchandise {
    pub title: String,
    pub product: RawProduct,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawProduct {
    pub title: String,
}

impl From<RawCart> for CartSummary {
    fn from(cart: RawCart) -> Self {
        Self {
            id: cart.id,
            checkout_url: cart.checkout_url,
            total_quantity: u32::try_from(cart.total_quantity).unwrap_or(0),
            total: cart.cost.total_amount,
            lines: cart.lines.nodes.into_iter().map(CartLine::from).collect(),
        }
    }
}

impl From<RawCartLine> for CartLine {
    fn from(line: RawCartLine) -> Self {
        Self {
            id: line.id,
            title: line.merchandise.product.title,
            variant_title: if line.merchandise.title == "Default Title" {
                None
            } else {
                Some(line.merchandise.title)
            },
            quantity: u32::try_from(line.quantity).unwrap_or(1),
            total: line.cost.total_amount,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CART_JSON: &str = r#"{
        "cart": {
            "id": "gid://shopify/Cart/abc",
            "checkoutUrl": "https://shop.example/checkouts/abc",
            "totalQuantity": 3,
            "cost": { "totalAmount": { "amount": "49.99", "currencyCode": "SEK" } },
            "lines": { "nodes": [
                {
                    "id": "gid://shopify/CartLine/1",
                    "quantity": 2,
                    "cost": { "totalAmount": { "amount": "30.00", "currencyCode": "SEK" } },
                    "merchandise": { "title": "Default Title", "product": { "title": "Socks" } }
                },
                {
                    "id": "gid://shopify/CartLine/2",
                    "quantity": 1,
                    "cost": { "totalAmount": { "amount": "19.99", "currencyCode": "SEK" } },
                    "merchandise": { "title": "Large", "product": { "title": "Shirt" } }
                }
            ] }
        }
    }"#;

    #[test]
    fn test_cart_from_graphql_response() {
        let data: GetCartData = serde_json::from_str(CART_JSON).unwrap();
        let cart = CartSummary::from(data.cart.unwrap());

        assert_eq!(cart.total.amount, Decimal::new(4999, 2));
        assert_eq!(cart.total.currency_code, "SEK");
        assert_eq!(cart.total_quantity, 3);
        assert!(!cart.is_empty());
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].variant_title, None);
        assert_eq!(cart.lines[1].variant_title.as_deref(), Some("Large"));
    }

    #[test]
    fn test_missing_cart() {
        let data: GetCartData = serde_json::from_str(r#"{ "cart": null }"#).unwrap();
        assert!(data.cart.is_none());
    }

    #[test]
    fn test_money_display() {
        let money = Money {
            amount: Decimal::new(5, 0),
            currency_code: "USD".to_string(),
        };
        assert_eq!(money.display(), "5.00 USD");
    }
}
