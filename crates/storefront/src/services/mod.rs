//! Business logic services for storefront.
//!
//! # Services
//!
//! - `checkout_guard` - Runs the lifecycle hooks against fresh settings
//! - `notices` - One-shot customer notices kept in the session

pub mod checkout_guard;
pub mod notices;

pub use checkout_guard::CheckoutGuard;
