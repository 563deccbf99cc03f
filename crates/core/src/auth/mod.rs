//! Authentication, roles, and password hashing.
//!
//! This module provides:
//! - The closed set of user roles, normalized once at the boundary
//! - The authenticated principal every scoped operation receives
//! - Password hashing with Argon2id

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Reads and uploads data for their own company.
    Analyst,
    /// Company executive, scoped to their own company.
    Ceo,
    /// Sees every company in the group.
    GroupAdmin,
}

impl Role {
    /// Returns the normalized (lowercase) role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyst => "analyst",
            Self::Ceo => "ceo",
            Self::GroupAdmin => "groupadmin",
        }
    }

    /// Returns true if this role has visibility over all companies.
    #[must_use]
    pub const fn sees_all_companies(self) -> bool {
        matches!(self, Self::GroupAdmin)
    }

    /// Returns true if users with this role must be assigned a company.
    #[must_use]
    pub const fn requires_company(self) -> bool {
        !self.sees_all_companies()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected analyst, ceo, or groupadmin)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyst" => Ok(Self::Analyst),
            "ceo" => Ok(Self::Ceo),
            "groupadmin" => Ok(Self::GroupAdmin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// An authenticated user, resolved server-side from the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// User ID.
    pub id: i32,
    /// Username.
    pub username: String,
    /// Normalized role.
    pub role: Role,
    /// Assigned company, if any.
    pub company_id: Option<i32>,
}

impl Principal {
    /// Creates a principal.
    #[must_use]
    pub fn new(id: i32, username: impl Into<String>, role: Role, company_id: Option<i32>) -> Self {
        Self {
            id,
            username: username.into(),
            role,
            company_id,
        }
    }

    /// Returns true if the principal is a group administrator.
    #[must_use]
    pub const fn is_group_admin(&self) -> bool {
        self.role.sees_all_companies()
    }
}
