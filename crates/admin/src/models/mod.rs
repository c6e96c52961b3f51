//! Domain models for admin.

pub mod session;

pub use order_value_bouncer_core::{AdminRole, Capability};
pub use session::{CurrentAdmin, FieldError, SettingsFlash, keys as session_keys};
