//! Errors raised by the settings validators and the checkout rule.

use rust_decimal::Decimal;

use crate::types::{MinimumAmount, keys};

/// Errors produced while validating settings or enforcing the minimum.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The minimum amount input is not a non-negative integer.
    #[error("Minimum Order Amount should be an integer greater than or equal to 0")]
    InvalidAmount,

    /// The message input is empty once sanitized.
    #[error("Message should not be empty")]
    EmptyMessage,

    /// The cart total is under the configured minimum.
    ///
    /// A business-rule rejection surfaced to the customer, not a fault.
    #[error("cart total {total} is below the minimum order amount {minimum}")]
    BelowMinimum {
        /// Cart total at the time of the check.
        total: Decimal,
        /// Configured minimum.
        minimum: MinimumAmount,
    },
}

impl SettingsError {
    /// The form field this error belongs to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<SettingsField> {
        match self {
            Self::InvalidAmount => Some(SettingsField::Minimum),
            Self::EmptyMessage => Some(SettingsField::Message),
            Self::BelowMinimum { .. } => None,
        }
    }

    /// Stable error code for session storage and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "minimum_order_amount_minimum_error",
            Self::EmptyMessage => "minimum_order_amount_message_error",
            Self::BelowMinimum { .. } => "minimum_order_amount_below_minimum",
        }
    }
}

/// One of the two settings form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsField {
    /// The minimum order amount input.
    Minimum,
    /// The cart message textarea.
    Message,
}

impl SettingsField {
    /// Store key and form field name for this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Minimum => keys::MINIMUM,
            Self::Message => keys::MESSAGE,
        }
    }
}
