//! Admin roles and the capabilities they grant.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to all admin features including user management.
    SuperAdmin,
    /// Full access to store settings.
    Admin,
    /// Read-only access.
    Viewer,
}

impl AdminRole {
    /// Whether this role holds the given capability.
    #[must_use]
    pub const fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageOptions => matches!(self, Self::SuperAdmin | Self::Admin),
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

/// A permission required by an admin page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Change store-wide settings.
    ManageOptions,
}

impl Capability {
    /// Capability name as shown in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageOptions => "manage_options",
        }
    }
}
