//! Order Value Bouncer storefront library.
//!
//! The cart page and checkout redirect, guarded by the minimum order rule.
//! Exposed as a library so the handlers and services can be tested.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
