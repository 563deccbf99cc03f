//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use sheetwise_shared::AppError;
use thiserror::Error;
use tracing::{info, warn};

use crate::entities::{sea_orm_active_enums::UserRole, users};
use sheetwise_core::auth::{Principal, Role, verify_password};

/// Errors from user storage.
#[derive(Debug, Error)]
pub enum UserError {
    /// The username is taken.
    #[error("Username '{0}' already exists")]
    AlreadyExists(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::AlreadyExists(_) => Self::Conflict(err.to_string()),
            UserError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user.
    ///
    /// `password_hash` must already be hashed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the username is taken.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
        company_id: Option<i32>,
    ) -> Result<users::Model, UserError> {
        let user = users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password_hash.to_string()),
            role: Set(UserRole::from(role)),
            company_id: Set(company_id),
            ..Default::default()
        };

        let model = user.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                UserError::AlreadyExists(username.to_string())
            }
            _ => UserError::Database(e),
        })?;

        info!(user_id = model.id, role = %role, "Created user");
        Ok(model)
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks a username and password.
    ///
    /// Returns `None` for an unknown user or a wrong password.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Principal>, DbErr> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        match verify_password(password, &user.password) {
            Ok(true) => Ok(Some(to_principal(user))),
            Ok(false) => Ok(None),
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Stored password hash is unreadable");
                Ok(None)
            }
        }
    }
}

/// Convert a stored user to the principal scoped operations receive.
#[must_use]
pub fn to_principal(user: users::Model) -> Principal {
    Principal::new(user.id, user.username, user.role.into(), user.company_id)
}
