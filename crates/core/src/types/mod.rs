//! Core types for Order Value Bouncer.
//!
//! This module provides type-safe wrappers for the persisted configuration and
//! the admin permission model.

pub mod role;
pub mod settings;

pub use role::{AdminRole, Capability};
pub use settings::{BouncerSettings, CartMessage, MinimumAmount, keys};
