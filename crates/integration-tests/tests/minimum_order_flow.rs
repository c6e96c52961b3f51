//! Settings saved in the admin, enforced at the storefront.
//!
//! Each test submits the settings form, writes the accepted rows into an
//! in-memory table, reads them back the way the storefront does and runs both
//! checkout events against a cart total.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;

use order_value_bouncer_admin::routes::settings::{SettingsForm, process_submission};
use order_value_bouncer_core::{
    BouncerSettings, CartMessage, CheckoutEvent, Destination, HookFlow, LifecycleHooks,
    MinimumAmount, NoticeLevel, SettingsField, keys,
};
use order_value_bouncer_integration_tests::SettingsRows;
use order_value_bouncer_storefront::services::checkout_guard::evaluate;

const EVENTS: [CheckoutEvent; 2] = [
    CheckoutEvent::CheckCartItems,
    CheckoutEvent::BeforeCheckoutProcess,
];

fn form(minimum: &str, message: &str) -> SettingsForm {
    SettingsForm {
        minimum: minimum.to_owned(),
        message: message.to_owned(),
    }
}

fn submit(rows: &mut SettingsRows, minimum: &str, message: &str) {
    let outcome = process_submission(&rows.settings(), &form(minimum, message));
    rows.apply(&outcome);
}

fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn run(rows: &SettingsRows, event: CheckoutEvent, total: Decimal) -> HookFlow {
    evaluate(&LifecycleHooks::minimum_order(), event, rows.settings(), total)
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_nothing_saved_uses_defaults() {
    let rows = SettingsRows::new();

    assert_eq!(rows.settings(), BouncerSettings::default());
    assert_eq!(rows.settings().minimum_amount, MinimumAmount::new(50));

    for event in EVENTS {
        let HookFlow::Halt(interruption) = run(&rows, event, dollars(4999)) else {
            panic!("{event} should halt below the default minimum");
        };
        assert_eq!(interruption.notice.message, CartMessage::DEFAULT_TEXT);
        assert_eq!(run(&rows, event, dollars(5000)), HookFlow::Continue);
    }
}

#[test]
fn test_undecodable_rows_fall_back_to_defaults() {
    let mut rows = SettingsRows::new();
    rows.insert_raw(keys::MINIMUM, json!("lots"));
    rows.insert_raw(keys::MESSAGE, json!(42));

    assert_eq!(rows.settings(), BouncerSettings::default());
}

// =============================================================================
// Saved settings reach checkout
// =============================================================================

#[test]
fn test_saved_settings_block_and_allow() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "75", "Spend at least $75 to check out.");

    assert_eq!(rows.get(keys::MINIMUM), Some(&json!(75)));
    assert_eq!(
        rows.get(keys::MESSAGE),
        Some(&json!("Spend at least $75 to check out."))
    );

    for event in EVENTS {
        let HookFlow::Halt(interruption) = run(&rows, event, dollars(7499)) else {
            panic!("{event} should halt at 74.99");
        };
        assert_eq!(interruption.notice.level, NoticeLevel::Error);
        assert_eq!(
            interruption.notice.message,
            "Spend at least $75 to check out."
        );
        assert_eq!(interruption.redirect, Destination::CartPage);

        assert_eq!(run(&rows, event, dollars(7500)), HookFlow::Continue);
        assert_eq!(run(&rows, event, dollars(12000)), HookFlow::Continue);
    }
}

#[test]
fn test_zero_minimum_never_blocks() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "0", "Unused");

    for event in EVENTS {
        assert_eq!(run(&rows, event, Decimal::ZERO), HookFlow::Continue);
        assert_eq!(run(&rows, event, dollars(1)), HookFlow::Continue);
    }
}

#[test]
fn test_message_is_sanitized_before_it_reaches_customers() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "50", "  <b>Almost there!</b>\n Add a little more. ");

    let HookFlow::Halt(interruption) = run(&rows, CheckoutEvent::CheckCartItems, dollars(100))
    else {
        panic!("cart below minimum should halt");
    };
    assert_eq!(interruption.notice.message, "Almost there! Add a little more.");
}

// =============================================================================
// Rejected input
// =============================================================================

#[test]
fn test_partial_submission_persists_only_valid_field() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "60", "Sixty minimum");

    let outcome = process_submission(&rows.settings(), &form("-5", "New message"));
    assert_eq!(outcome.accepted, vec![SettingsField::Message]);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].field, SettingsField::Minimum);
    assert!(!outcome.flash().saved);

    rows.apply(&outcome);

    assert_eq!(rows.get(keys::MINIMUM), Some(&json!(60)));
    assert_eq!(rows.get(keys::MESSAGE), Some(&json!("New message")));
    assert_eq!(rows.settings().minimum_amount, MinimumAmount::new(60));
}

#[test]
fn test_fully_rejected_submission_changes_nothing() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "40", "Forty minimum");
    let before = rows.clone();

    let outcome = process_submission(&rows.settings(), &form("abc", "   "));
    assert!(outcome.accepted.is_empty());
    assert_eq!(outcome.errors.len(), 2);

    rows.apply(&outcome);
    assert_eq!(rows.settings(), before.settings());
    assert!(run(&rows, CheckoutEvent::BeforeCheckoutProcess, dollars(3999)).is_halt());
}

#[test]
fn test_rejected_first_save_keeps_defaults_unwritten() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "", "");

    assert_eq!(rows.get(keys::MINIMUM), None);
    assert_eq!(rows.get(keys::MESSAGE), None);
    assert_eq!(rows.settings(), BouncerSettings::default());
}

// =============================================================================
// Repeat saves
// =============================================================================

#[test]
fn test_saving_same_values_twice_is_stable() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "25", "Twenty-five minimum");
    let first = rows.clone();

    let current = rows.settings();
    let outcome = process_submission(
        &current,
        &form(
            &current.minimum_amount.to_string(),
            current.message.as_str(),
        ),
    );
    assert!(outcome.flash().saved);
    rows.apply(&outcome);

    assert_eq!(rows.get(keys::MINIMUM), first.get(keys::MINIMUM));
    assert_eq!(rows.get(keys::MESSAGE), first.get(keys::MESSAGE));
}

#[test]
fn test_decimal_minimum_is_truncated() {
    let mut rows = SettingsRows::new();
    submit(&mut rows, "49.99", "Forty-nine minimum");

    assert_eq!(rows.settings().minimum_amount, MinimumAmount::new(49));
    assert_eq!(
        run(&rows, CheckoutEvent::CheckCartItems, dollars(4900)),
        HookFlow::Continue
    );
}
