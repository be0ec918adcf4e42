//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Admin role definitions

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Admin roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to every admin surface.
    SuperAdmin,
    /// Restricted to contact-enquiry management.
    ContactManager,
}

impl AdminRole {
    /// Returns true if this role can manage gold rate snapshots.
    #[must_use]
    pub const fn can_manage_rates(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Returns true if this role can manage stores and content sections.
    #[must_use]
    pub const fn can_manage_content(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Returns true if this role can view and manage contact enquiries.
    #[must_use]
    pub const fn can_view_enquiries(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::ContactManager)
    }

    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::ContactManager => "contact_manager",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown admin role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for AdminRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "contact_manager" => Ok(Self::ContactManager),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(AdminRole::SuperAdmin.can_manage_rates());
        assert!(AdminRole::SuperAdmin.can_manage_content());
        assert!(AdminRole::SuperAdmin.can_view_enquiries());

        assert!(!AdminRole::ContactManager.can_manage_rates());
        assert!(!AdminRole::ContactManager.can_manage_content());
        assert!(AdminRole::ContactManager.can_view_enquiries());
    }

    #[test]
    fn test_role_round_trips_wire_strings() {
        assert_eq!(AdminRole::SuperAdmin.to_string(), "super_admin");
        assert_eq!(AdminRole::ContactManager.to_string(), "contact_manager");

        assert_eq!("super_admin".parse(), Ok(AdminRole::SuperAdmin));
        assert_eq!("contact_manager".parse(), Ok(AdminRole::ContactManager));
        assert!("viewer".parse::<AdminRole>().is_err());
    }
}
