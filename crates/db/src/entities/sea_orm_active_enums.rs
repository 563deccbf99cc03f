//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use sheetwise_core::auth::Role;

/// Stored user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Company analyst.
    #[sea_orm(string_value = "analyst")]
    Analyst,
    /// Company executive.
    #[sea_orm(string_value = "ceo")]
    Ceo,
    /// Group administrator.
    #[sea_orm(string_value = "groupadmin")]
    GroupAdmin,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Analyst => Self::Analyst,
            Role::Ceo => Self::Ceo,
            Role::GroupAdmin => Self::GroupAdmin,
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Analyst => Self::Analyst,
            UserRole::Ceo => Self::Ceo,
            UserRole::GroupAdmin => Self::GroupAdmin,
        }
    }
}
