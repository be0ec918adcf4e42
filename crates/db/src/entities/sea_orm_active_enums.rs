//! Database enum types mapped to Rust enums.

use aurum_core::auth;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `admin_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "admin_role")]
pub enum AdminRole {
    /// Full access to every admin surface.
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
    /// Restricted to contact enquiries.
    #[sea_orm(string_value = "contact_manager")]
    ContactManager,
}

impl From<AdminRole> for auth::AdminRole {
    fn from(role: AdminRole) -> Self {
        match role {
            AdminRole::SuperAdmin => Self::SuperAdmin,
            AdminRole::ContactManager => Self::ContactManager,
        }
    }
}

impl From<auth::AdminRole> for AdminRole {
    fn from(role: auth::AdminRole) -> Self {
        match role {
            auth::AdminRole::SuperAdmin => Self::SuperAdmin,
            auth::AdminRole::ContactManager => Self::ContactManager,
        }
    }
}
