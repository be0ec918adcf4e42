//! Authentication wire types for the admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for admin access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username).
    pub sub: String,
    /// Admin user ID.
    pub user_id: Uuid,
    /// Admin role (`super_admin` or `contact_manager`).
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an admin user.
    #[must_use]
    pub fn new(username: &str, user_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the username from claims.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

/// Token response returned after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Token type, always `bearer`.
    pub token_type: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Creates a bearer token response.
    #[must_use]
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::minutes(30);

        let claims = Claims::new("admin", user_id, "super_admin", expires_at);

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, "super_admin");
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_claims_username_returns_sub() {
        let claims = Claims::new(
            "contact_manager",
            Uuid::new_v4(),
            "contact_manager",
            Utc::now() + Duration::minutes(30),
        );

        assert_eq!(claims.username(), "contact_manager");
    }

    #[test]
    fn test_token_response_bearer() {
        let response = TokenResponse::bearer("abc".to_string(), 1800);

        assert_eq!(response.access_token, "abc");
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 1800);
    }
}
