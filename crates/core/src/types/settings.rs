//! Minimum order configuration.
//!
//! The configuration is a singleton made of two keys in the settings store.
//! Every read path goes through [`BouncerSettings::from_stored`] so defaults are
//! applied the same way everywhere.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::SettingsError;
use crate::sanitize::sanitize_text_field;

/// Settings store keys owned by the bouncer.
///
/// The same names are used for the admin form fields.
pub mod keys {
    /// Key holding the minimum order amount.
    pub const MINIMUM: &str = "minimum_order_amount_minimum";

    /// Key holding the message shown when the cart is below the minimum.
    pub const MESSAGE: &str = "minimum_order_amount_message";
}

/// Plain decimal notation: optional sign, digits, optional fraction.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])?(\d*)(?:\.(\d*))?$").expect("Invalid regex"));

/// Minimum cart total, in whole units of the store currency.
///
/// Unsigned by construction, so a stored minimum can never be negative.
///
/// ## Examples
///
/// ```
/// use order_value_bouncer_core::MinimumAmount;
///
/// assert_eq!(MinimumAmount::default().value(), 50);
/// assert_eq!(MinimumAmount::parse("12.7"), Some(MinimumAmount::new(12)));
/// assert_eq!(MinimumAmount::parse("-5"), None);
/// assert_eq!(MinimumAmount::parse("abc"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinimumAmount(u64);

impl MinimumAmount {
    /// Minimum used when nothing has been saved yet.
    pub const DEFAULT: Self = Self(50);

    /// Create a minimum amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the amount in whole currency units.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the amount as a decimal for comparison with cart totals.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Coerce admin input to a non-negative integer.
    ///
    /// Accepts plain decimal notation (`"50"`, `"+7"`, `"12.7"`, `".5"`). The
    /// fraction is truncated toward zero before the sign is checked, so
    /// `"-0.5"` is 0. Returns `None` for empty or non-numeric input, negative
    /// whole amounts, values past `u64::MAX`, and exponent or digit-separator
    /// forms such as `"1e3"` and `"1_000"`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let caps = AMOUNT_RE.captures(input.trim())?;
        let whole = caps.get(2).map_or("", |m| m.as_str());
        let fraction = caps.get(3).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let amount = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().ok()?
        };

        let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");
        if negative && amount != 0 {
            return None;
        }

        Some(Self(amount))
    }

    /// Decode a value read from the settings store.
    ///
    /// Numbers and numeric strings are both accepted since older rows were
    /// written as form strings.
    #[must_use]
    pub fn from_stored(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n.as_u64().map(Self),
            JsonValue::String(s) => Self::parse(s),
            _ => None,
        }
    }

    /// Encode for the settings store.
    #[must_use]
    pub fn to_stored(self) -> JsonValue {
        JsonValue::from(self.0)
    }
}

impl Default for MinimumAmount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MinimumAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MinimumAmount {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Message shown to the customer when the cart is below the minimum.
///
/// Always non-empty. Built either from sanitized admin input via
/// [`CartMessage::parse`] or from a stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartMessage(String);

impl CartMessage {
    /// Message used when nothing has been saved yet.
    pub const DEFAULT_TEXT: &'static str = "Your current order total is below the minimum order amount.";

    /// Sanitize admin input into a message.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyMessage`] if nothing is left after
    /// sanitization (blank input, whitespace only, markup only).
    pub fn parse(input: &str) -> Result<Self, SettingsError> {
        let sanitized = sanitize_text_field(input);
        if sanitized.is_empty() {
            return Err(SettingsError::EmptyMessage);
        }
        Ok(Self(sanitized))
    }

    /// Decode a value read from the settings store.
    #[must_use]
    pub fn from_stored(value: &JsonValue) -> Option<Self> {
        value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_owned()))
    }

    /// Encode for the settings store.
    #[must_use]
    pub fn to_stored(&self) -> JsonValue {
        JsonValue::String(self.0.clone())
    }

    /// Returns the message as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the message and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for CartMessage {
    fn default() -> Self {
        Self(Self::DEFAULT_TEXT.to_owned())
    }
}

impl fmt::Display for CartMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CartMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The bouncer configuration: minimum amount and cart message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BouncerSettings {
    /// Carts totalling less than this are blocked from checkout.
    pub minimum_amount: MinimumAmount,
    /// Error notice text shown to blocked customers.
    pub message: CartMessage,
}

impl BouncerSettings {
    /// Build the configuration from raw store values.
    ///
    /// Missing or undecodable values fall back to their defaults. Callers that
    /// want to report bad rows should compare against [`MinimumAmount::from_stored`]
    /// and [`CartMessage::from_stored`] first.
    #[must_use]
    pub fn from_stored(minimum: Option<&JsonValue>, message: Option<&JsonValue>) -> Self {
        Self {
            minimum_amount: minimum
                .and_then(MinimumAmount::from_stored)
                .unwrap_or_default(),
            message: message.and_then(CartMessage::from_stored).unwrap_or_default(),
        }
    }
}
