//! Order Value Bouncer Core - Shared types and checkout rules.
//!
//! This crate provides the pieces shared by every Order Value Bouncer component:
//! - `storefront` - Customer-facing cart and checkout gate
//! - `admin` - Settings page for the minimum order amount
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types, validators and pure decision logic - no
//! I/O, no database access, no HTTP clients. The binaries load configuration and
//! cart totals, then hand them to this crate as plain values.
//!
//! # Modules
//!
//! - [`types`] - Configuration values and admin roles
//! - [`validation`] - Reject-and-retain validators for the settings form
//! - [`sanitize`] - Text-field sanitization for the cart message
//! - [`checkout`] - The minimum order rule and customer notices
//! - [`hooks`] - Lifecycle event subscription table

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod error;
pub mod hooks;
pub mod sanitize;
pub mod types;
pub mod validation;

pub use checkout::{CheckoutEvent, CheckoutSnapshot, Notice, NoticeLevel};
pub use error::{SettingsError, SettingsField};
pub use hooks::{Destination, HookFlow, Interruption, LifecycleHooks};
pub use types::*;
pub use validation::{Rejected, validate_message, validate_minimum};
