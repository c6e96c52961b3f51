//! Session-related types for the admin panel.

use serde::{Deserialize, Serialize};

use order_value_bouncer_core::{AdminRole, SettingsError, SettingsField};

/// Session-stored admin identity.
///
/// Written by the host's sign-in flow; this crate only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's email address.
    pub email: String,
    /// Admin's display name.
    pub name: String,
    /// Admin's role/permission level.
    pub role: AdminRole,
}

/// A rejected settings field, as shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: SettingsField,
    pub code: String,
    pub message: String,
}

impl FieldError {
    /// Build from a validator error. Returns `None` for errors that do not
    /// belong to a form field.
    #[must_use]
    pub fn from_error(error: &SettingsError) -> Option<Self> {
        Some(Self {
            field: error.field()?,
            code: error.code().to_owned(),
            message: error.to_string(),
        })
    }

    /// Form field name, used to anchor the message in the page.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        self.field.key()
    }
}

/// Result of the last settings submission, shown once after the redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFlash {
    pub saved: bool,
    pub errors: Vec<FieldError>,
}

/// Session keys for admin data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the settings page flash.
    pub const SETTINGS_FLASH: &str = "settings_flash";
}
