//! User role models
//!
//! Accounts and sessions live in the external auth service; the dashboard only
//! sees the roles carried in the access token.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ParseEnumError;

/// Roles a dashboard user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
}

impl UserRole {
    /// Admins and managers may delete catalog entries and manage categories
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "staff" => Ok(UserRole::Staff),
            other => Err(ParseEnumError::UserRole(other.to_string())),
        }
    }
}
