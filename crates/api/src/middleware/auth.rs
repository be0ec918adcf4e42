//! Authentication middleware for the JWT-gated admin JSON API.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use aurum_core::auth::AdminRole;
use aurum_db::entities::admin_users;
use aurum_db::repositories::AdminUserRepository;
use aurum_shared::JwtError;

use crate::AppState;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Re-loads the admin account named by the token subject
/// 4. Stores the account in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    // Validate token
    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            let (error, message) = match e {
                JwtError::Expired => ("token_expired", "Token has expired"),
                _ => ("invalid_token", "Invalid or malformed token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    // The account behind a still-valid token can disappear; treat that
    // the same as a bad token.
    let repo = AdminUserRepository::new((*state.db).clone());
    match repo.find_by_username(claims.username()).await {
        Ok(Some(admin)) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unknown_user",
                "message": "Account for this token no longer exists"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "admin lookup failed during authentication");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "database_error",
                    "message": "Failed to verify account"
                })),
            )
                .into_response()
        }
    }
}

/// Extractor for the authenticated admin account.
///
/// Use this in handlers behind `auth_middleware`:
///
/// ```ignore
/// async fn handler(admin: AuthAdmin) -> impl IntoResponse {
///     let role = admin.role();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub admin_users::Model);

impl AuthAdmin {
    /// Returns the admin's role as the domain enum.
    #[must_use]
    pub fn role(&self) -> AdminRole {
        self.0.role.into()
    }

    /// Returns the admin's username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<admin_users::Model>()
            .cloned()
            .map(AuthAdmin)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Basic abc123"), None);
        assert_eq!(extract_bearer_token("abc123"), None);
    }
}
