//! The minimum order rule.
//!
//! The rule is a single predicate, `cart_total < minimum_amount`, applied at two
//! checkpoints of the checkout lifecycle. Both checkpoints run the same rule.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::hooks::{Destination, HookFlow, Interruption};
use crate::types::BouncerSettings;

/// Checkout lifecycle events the storefront fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutEvent {
    /// The cart's contents are being checked for display.
    CheckCartItems,
    /// The customer is about to be sent into checkout.
    BeforeCheckoutProcess,
}

impl CheckoutEvent {
    /// Every event, in lifecycle order.
    pub const ALL: [Self; 2] = [Self::CheckCartItems, Self::BeforeCheckoutProcess];

    /// Event name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckCartItems => "check_cart_items",
            Self::BeforeCheckoutProcess => "before_checkout_process",
        }
    }
}

impl fmt::Display for CheckoutEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a customer-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Something stopped the customer; shown in the error style.
    Error,
}

impl NoticeLevel {
    /// CSS modifier used by the templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

/// A one-shot message shown on the customer's next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Display style.
    pub level: NoticeLevel,
    /// Plain text; escaped when rendered.
    pub message: String,
}

impl Notice {
    /// Create an error-level notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything a lifecycle handler may look at, read fresh for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSnapshot {
    /// Configuration as currently stored.
    pub settings: BouncerSettings,
    /// Cart total as computed by the commerce backend.
    pub cart_total: Decimal,
}

impl CheckoutSnapshot {
    /// Create a snapshot.
    #[must_use]
    pub const fn new(settings: BouncerSettings, cart_total: Decimal) -> Self {
        Self {
            settings,
            cart_total,
        }
    }

    /// Whether the cart total is under the configured minimum.
    ///
    /// The boundary is inclusive: a total equal to the minimum passes.
    #[must_use]
    pub fn is_below_minimum(&self) -> bool {
        self.cart_total < self.settings.minimum_amount.as_decimal()
    }
}

/// Lifecycle handler enforcing the minimum order amount.
///
/// Halts with the configured message as an error notice and a redirect to the
/// cart page when the cart is below the minimum.
#[must_use]
pub fn enforce_minimum_order(snapshot: &CheckoutSnapshot) -> HookFlow {
    if !snapshot.is_below_minimum() {
        return HookFlow::Continue;
    }

    HookFlow::Halt(Interruption {
        notice: Notice::error(snapshot.settings.message.as_str()),
        redirect: Destination::CartPage,
        reason: SettingsError::BelowMinimum {
            total: snapshot.cart_total,
            minimum: snapshot.settings.minimum_amount,
        },
    })
}
