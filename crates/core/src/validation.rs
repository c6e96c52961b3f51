//! Validators for the settings form.
//!
//! Both validators use a reject-and-retain policy: on invalid input they hand
//! back the previously stored value together with the error, so a bad
//! submission never overwrites a valid setting.

use crate::error::SettingsError;
use crate::types::{CartMessage, MinimumAmount};

/// A rejected form value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected<T> {
    /// Why the input was rejected.
    pub error: SettingsError,
    /// The previous value, which stays in effect.
    pub retained: T,
}

impl<T> Rejected<T> {
    const fn new(error: SettingsError, retained: T) -> Self {
        Self { error, retained }
    }
}

/// Validate the minimum order amount input.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidAmount`] with `previous` retained when the
/// input does not coerce to a non-negative integer.
///
/// ## Examples
///
/// ```
/// use order_value_bouncer_core::{MinimumAmount, SettingsError, validate_minimum};
///
/// let previous = MinimumAmount::new(50);
/// assert_eq!(validate_minimum("75", previous), Ok(MinimumAmount::new(75)));
///
/// let rejected = validate_minimum("-5", previous).unwrap_err();
/// assert_eq!(rejected.error, SettingsError::InvalidAmount);
/// assert_eq!(rejected.retained, previous);
/// ```
pub fn validate_minimum(
    input: &str,
    previous: MinimumAmount,
) -> Result<MinimumAmount, Rejected<MinimumAmount>> {
    MinimumAmount::parse(input).ok_or(Rejected::new(SettingsError::InvalidAmount, previous))
}

/// Validate the cart message input.
///
/// # Errors
///
/// Returns [`SettingsError::EmptyMessage`] with `previous` retained when the
/// input is empty after sanitization.
pub fn validate_message(
    input: &str,
    previous: &CartMessage,
) -> Result<CartMessage, Rejected<CartMessage>> {
    CartMessage::parse(input).map_err(|error| Rejected::new(error, previous.clone()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_accepts_non_negative_integers() {
        let previous = MinimumAmount::new(50);
        for n in [0_u64, 1, 49, 50, 51, 1_000, 999_999, u64::MAX] {
            assert_eq!(
                validate_minimum(&n.to_string(), previous),
                Ok(MinimumAmount::new(n))
            );
        }
    }

    #[test]
    fn test_minimum_rejects_and_retains_previous() {
        let previous = MinimumAmount::new(120);
        for input in ["-5", "-1", "abc", "", "  ", "1e3x", "1e3", "1_000", "1_0_0"] {
            let rejected = validate_minimum(input, previous).unwrap_err();
            assert_eq!(rejected.error, SettingsError::InvalidAmount, "input {input:?}");
            assert_eq!(rejected.retained, previous);
        }
    }

    #[test]
    fn test_minimum_negative_fraction_truncates_to_zero() {
        let previous = MinimumAmount::new(77);
        assert_eq!(validate_minimum("-0.5", previous), Ok(MinimumAmount::new(0)));
        assert_eq!(validate_minimum("-0", previous), Ok(MinimumAmount::new(0)));
    }

    #[test]
    fn test_message_accepts_sanitized_text() {
        let previous = CartMessage::default();
        let accepted = validate_message("Spend <b>25</b> more to check out", &previous).unwrap();
        assert_eq!(accepted.as_str(), "Spend 25 more to check out");
    }

    #[test]
    fn test_message_rejects_and_retains_previous() {
        let previous = CartMessage::parse("Minimum is 30").unwrap();
        for input in ["", "   ", "\n\t", "<p></p>", "<script>x()</script>"] {
            let rejected = validate_message(input, &previous).unwrap_err();
            assert_eq!(rejected.error, SettingsError::EmptyMessage, "input {input:?}");
            assert_eq!(rejected.retained, previous);
        }
    }
}
