//! Company repository for database operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::entities::companies;

/// Company repository.
///
/// Reads go through [`super::BalanceSheetRepository`]; this covers creation
/// at seed or import time.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub async fn create(
        &self,
        name: &str,
        parent_group: Option<&str>,
    ) -> Result<companies::Model, DbErr> {
        companies::ActiveModel {
            name: Set(name.to_string()),
            parent_group: Set(parent_group.map(str::to_string)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }
}
