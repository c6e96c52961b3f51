//! Lifecycle event subscription table.
//!
//! Handlers are registered explicitly, once, when the application state is
//! built. Dispatch runs the handlers for an event in registration order and
//! stops at the first one that halts.
//!
//! # Example
//!
//! ```
//! use order_value_bouncer_core::{
//!     BouncerSettings, CheckoutEvent, CheckoutSnapshot, HookFlow, LifecycleHooks,
//! };
//! use rust_decimal::Decimal;
//!
//! let hooks = LifecycleHooks::minimum_order();
//! let snapshot = CheckoutSnapshot::new(BouncerSettings::default(), Decimal::new(4999, 2));
//!
//! assert!(matches!(
//!     hooks.dispatch(CheckoutEvent::BeforeCheckoutProcess, &snapshot),
//!     HookFlow::Halt(_)
//! ));
//! ```

use std::collections::HashMap;

use crate::checkout::{CheckoutEvent, CheckoutSnapshot, Notice, enforce_minimum_order};
use crate::error::SettingsError;

/// A lifecycle handler.
pub type HookHandler = fn(&CheckoutSnapshot) -> HookFlow;

/// Where a halted event sends the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The cart page.
    CartPage,
}

/// Why and how an event was halted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interruption {
    /// Notice to show on the next rendered page.
    pub notice: Notice,
    /// Page to send the customer to.
    pub redirect: Destination,
    /// The rule that fired.
    pub reason: SettingsError,
}

/// Result of running lifecycle handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookFlow {
    /// Processing continues normally.
    Continue,
    /// Processing of the event stops here.
    Halt(Interruption),
}

impl HookFlow {
    /// Whether the event was halted.
    #[must_use]
    pub const fn is_halt(&self) -> bool {
        matches!(self, Self::Halt(_))
    }
}

/// Event to handler subscriptions.
#[derive(Debug, Clone, Default)]
pub struct LifecycleHooks {
    table: HashMap<CheckoutEvent, Vec<HookHandler>>,
}

impl LifecycleHooks {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The table used by the storefront: the minimum order rule on both
    /// checkout events.
    #[must_use]
    pub fn minimum_order() -> Self {
        Self::new()
            .subscribe(CheckoutEvent::CheckCartItems, enforce_minimum_order)
            .subscribe(CheckoutEvent::BeforeCheckoutProcess, enforce_minimum_order)
    }

    /// Register a handler for an event.
    #[must_use]
    pub fn subscribe(mut self, event: CheckoutEvent, handler: HookHandler) -> Self {
        self.table.entry(event).or_default().push(handler);
        self
    }

    /// Number of handlers registered for an event.
    #[must_use]
    pub fn handler_count(&self, event: CheckoutEvent) -> usize {
        self.table.get(&event).map_or(0, Vec::len)
    }

    /// Run the handlers for `event` against `snapshot`.
    ///
    /// Returns the first [`HookFlow::Halt`]; later handlers for the event do not
    /// run.
    #[must_use]
    pub fn dispatch(&self, event: CheckoutEvent, snapshot: &CheckoutSnapshot) -> HookFlow {
        let Some(handlers) = self.table.get(&event) else {
            return HookFlow::Continue;
        };

        handlers
            .iter()
            .map(|handler| handler(snapshot))
            .find(HookFlow::is_halt)
            .unwrap_or(HookFlow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{BouncerSettings, MinimumAmount};

    fn snapshot(minimum: u64, total: Decimal) -> CheckoutSnapshot {
        CheckoutSnapshot::new(
            BouncerSettings {
                minimum_amount: MinimumAmount::new(minimum),
                ..BouncerSettings::default()
            },
            total,
        )
    }

    #[test]
    fn test_minimum_order_registers_both_events() {
        let hooks = LifecycleHooks::minimum_order();
        for event in CheckoutEvent::ALL {
            assert_eq!(hooks.handler_count(event), 1);
        }
    }

    #[test]
    fn test_both_events_block_below_minimum() {
        let hooks = LifecycleHooks::minimum_order();
        let below = snapshot(50, Decimal::new(4999, 2));
        for event in CheckoutEvent::ALL {
            let HookFlow::Halt(interruption) = hooks.dispatch(event, &below) else {
                panic!("{event} should halt");
            };
            assert_eq!(interruption.redirect, Destination::CartPage);
            assert_eq!(
                interruption.notice.message,
                BouncerSettings::default().message.as_str()
            );
        }
    }

    #[test]
    fn test_both_events_pass_at_minimum() {
        let hooks = LifecycleHooks::minimum_order();
        let at = snapshot(50, Decimal::new(5000, 2));
        for event in CheckoutEvent::ALL {
            assert_eq!(hooks.dispatch(event, &at), HookFlow::Continue);
        }
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let hooks = LifecycleHooks::minimum_order();
        let below = snapshot(50, Decimal::new(1000, 2));
        let first = hooks.dispatch(CheckoutEvent::CheckCartItems, &below);
        let second = hooks.dispatch(CheckoutEvent::CheckCartItems, &below);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_table_continues() {
        let hooks = LifecycleHooks::new();
        let below = snapshot(50, Decimal::ZERO);
        assert_eq!(
            hooks.dispatch(CheckoutEvent::BeforeCheckoutProcess, &below),
            HookFlow::Continue
        );
    }

    static LATE_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn count_late_call(_: &CheckoutSnapshot) -> HookFlow {
        LATE_CALLS.fetch_add(1, Ordering::SeqCst);
        HookFlow::Continue
    }

    #[test]
    fn test_halt_stops_later_handlers() {
        let hooks = LifecycleHooks::new()
            .subscribe(CheckoutEvent::CheckCartItems, enforce_minimum_order)
            .subscribe(CheckoutEvent::CheckCartItems, count_late_call);

        let before = LATE_CALLS.load(Ordering::SeqCst);
        let flow = hooks.dispatch(CheckoutEvent::CheckCartItems, &snapshot(50, Decimal::ONE));
        assert!(flow.is_halt());
        assert_eq!(LATE_CALLS.load(Ordering::SeqCst), before);

        let flow = hooks.dispatch(
            CheckoutEvent::CheckCartItems,
            &snapshot(50, Decimal::new(100, 0)),
        );
        assert!(!flow.is_halt());
        assert_eq!(LATE_CALLS.load(Ordering::SeqCst), before + 1);
    }
}
