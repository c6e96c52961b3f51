//! HTTP middleware and extractors for admin.

pub mod auth;
pub mod session;

pub use auth::{AdminAuthRejection, RequireManageOptions};
pub use session::create_session_layer;
