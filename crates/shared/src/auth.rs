//! Authentication types for session tokens and auth payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims for session tokens.
///
/// Only the user ID is carried; role and company are always resolved
/// from the users table when the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i32,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: i32, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> i32 {
        self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// User password.
    pub password: String,
}

/// Signup request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Username (unique).
    pub username: String,
    /// User password.
    pub password: String,
    /// Role name, case-insensitive. Defaults to `analyst`.
    #[serde(default = "default_role")]
    pub role: String,
    /// Assigned company; required unless the role is `groupadmin`.
    pub company_id: Option<i32>,
}

fn default_role() -> String {
    "analyst".to_string()
}

/// Usernames are compared and stored without surrounding whitespace.
#[must_use]
pub fn normalize_username(username: &str) -> &str {
    username.trim()
}

impl LoginRequest {
    /// The username as stored.
    #[must_use]
    pub fn username(&self) -> &str {
        normalize_username(&self.username)
    }
}

impl SignupRequest {
    /// The username as it will be stored.
    #[must_use]
    pub fn username(&self) -> &str {
        normalize_username(&self.username)
    }
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated user info.
    pub user: UserInfo,
    /// Signed session token.
    pub access_token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// User info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i32,
    /// Username.
    pub username: String,
    /// Normalized (lowercase) role.
    pub role: String,
    /// Assigned company, if any.
    pub company_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let expires_at = Utc::now() + Duration::hours(1);
        let before = Utc::now().timestamp();

        let claims = Claims::new(42, expires_at);

        assert_eq!(claims.user_id(), 42);
        assert!(claims.iat >= before);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_signup_role_defaults_to_analyst() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"username":"rajiv","password":"pass123","company_id":1}"#)
                .unwrap();

        assert_eq!(req.role, "analyst");
        assert_eq!(req.company_id, Some(1));
    }

    #[test]
    fn test_login_and_signup_normalize_username_alike() {
        let signup: SignupRequest =
            serde_json::from_str(r#"{"username":" x ","password":"pw","company_id":1}"#).unwrap();
        let login: LoginRequest =
            serde_json::from_str(r#"{"username":" x ","password":"pw"}"#).unwrap();

        assert_eq!(signup.username(), "x");
        assert_eq!(login.username(), signup.username());
    }
}
