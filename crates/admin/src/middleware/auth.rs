//! Authentication extractors for admin.
//!
//! Sign-in itself is handled by the host; it stores a [`CurrentAdmin`] in the
//! session. These extractors read it and check capabilities.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{Capability, CurrentAdmin, session_keys};

/// Host sign-in page.
pub const LOGIN_PATH: &str = "/auth/login";

/// Error returned when the request is not allowed through.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// Signed in, but the role lacks the capability.
    Forbidden(Capability),
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden(capability) => {
                tracing::warn!(capability = capability.as_str(), "Admin lacks capability");
                (
                    StatusCode::FORBIDDEN,
                    "You do not have permission to access this page",
                )
                    .into_response()
            }
        }
    }
}

/// Decide whether a request may proceed.
///
/// # Errors
///
/// Returns a rejection if nobody is signed in or the role lacks `capability`.
pub fn authorize(
    admin: Option<CurrentAdmin>,
    path: &str,
    capability: Capability,
) -> Result<CurrentAdmin, AdminAuthRejection> {
    let Some(admin) = admin else {
        return Err(if path.starts_with("/api/") {
            AdminAuthRejection::Unauthorized
        } else {
            AdminAuthRejection::RedirectToLogin
        });
    };

    if !admin.role.can(capability) {
        return Err(AdminAuthRejection::Forbidden(capability));
    }

    Ok(admin)
}

/// Extractor that requires a signed-in admin with `manage_options`.
///
/// # Example
///
/// ```rust,ignore
/// async fn settings_page(
///     RequireManageOptions(admin): RequireManageOptions,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireManageOptions(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireManageOptions
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let admin = session
            .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten();

        authorize(admin, parts.uri.path(), Capability::ManageOptions).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::AdminRole;

    fn admin(role: AdminRole) -> CurrentAdmin {
        CurrentAdmin {
            email: "ops@shop.example".to_owned(),
            name: "Ops".to_owned(),
            role,
        }
    }

    #[test]
    fn test_signed_out_html_redirects_to_login() {
        assert_eq!(
            authorize(None, "/settings/minimum-order", Capability::ManageOptions).unwrap_err(),
            AdminAuthRejection::RedirectToLogin
        );
    }

    #[test]
    fn test_signed_out_api_is_unauthorized() {
        assert_eq!(
            authorize(None, "/api/settings", Capability::ManageOptions).unwrap_err(),
            AdminAuthRejection::Unauthorized
        );
    }

    #[test]
    fn test_viewer_is_forbidden() {
        assert_eq!(
            authorize(
                Some(admin(AdminRole::Viewer)),
                "/settings/minimum-order",
                Capability::ManageOptions
            )
            .unwrap_err(),
            AdminAuthRejection::Forbidden(Capability::ManageOptions)
        );
    }

    #[test]
    fn test_admins_are_allowed() {
        for role in [AdminRole::Admin, AdminRole::SuperAdmin] {
            let allowed = authorize(
                Some(admin(role)),
                "/settings/minimum-order",
                Capability::ManageOptions,
            )
            .unwrap();
            assert_eq!(allowed.role, role);
        }
    }

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            AdminAuthRejection::RedirectToLogin.into_response().status(),
            StatusCode::SEE_OTHER
        );
        assert_eq!(
            AdminAuthRejection::Forbidden(Capability::ManageOptions)
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
    }
}
