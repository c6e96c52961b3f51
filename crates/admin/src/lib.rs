//! Order Value Bouncer admin library.
//!
//! The settings page for the minimum order amount and cart message, exposed
//! as a library so the submission logic can be tested.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
