//! Session middleware and extractors for the admin HTML surface.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions with
//! SameSite=Strict cookies, and provides extractors that gate the
//! `/admin` pages by login state and role.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use uuid::Uuid;

use aurum_core::auth::AdminRole;
use aurum_shared::config::SessionConfig;

/// Session cookie name for the admin surface.
pub const SESSION_COOKIE_NAME: &str = "aurum_admin_session";

/// Session key for the logged-in admin.
pub const CURRENT_ADMIN_KEY: &str = "current_admin";

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
/// The access token lets admin pages talk to the JSON API on the
/// admin's behalf without prompting for credentials again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub user_id: Uuid,
    /// Admin's username.
    pub username: String,
    /// Admin's role.
    pub role: AdminRole,
    /// JWT issued at login, mirrored into the session.
    pub access_token: String,
}

/// Create the session layer with `PostgreSQL` store.
///
/// The session table is created by `PostgresStore::migrate` at startup.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &SessionConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    let max_age_secs = i64::try_from(config.max_age_hours)
        .unwrap_or(24)
        .saturating_mul(60 * 60);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(max_age_secs),
        ))
        .with_secure(config.secure_cookie)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Helper to record the logged-in admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(CURRENT_ADMIN_KEY, admin).await
}

const FORBIDDEN_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>403 Forbidden</title></head>\n\
<body>\n<h1>403 Forbidden</h1>\n<p>You do not have permission to view this page.</p>\n\
<p><a href=\"/admin\">Back to dashboard</a></p>\n</body>\n</html>\n";

/// Extractor that requires a logged-in admin of any role.
///
/// If nobody is logged in, redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Rejection for [`RequireAdmin`].
pub enum AdminAuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin/login").into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Session is placed in extensions by SessionManagerLayer.
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::RedirectToLogin)?;

        let admin: CurrentAdmin = session
            .get(CURRENT_ADMIN_KEY)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection::RedirectToLogin)?;

        Ok(Self(admin))
    }
}

/// Extractor that requires a logged-in super admin.
///
/// Redirects to login when nobody is logged in, and serves a 403 page
/// when the logged-in admin lacks the role.
pub struct RequireSuperAdmin(pub CurrentAdmin);

/// Rejection for [`RequireSuperAdmin`].
pub enum SuperAdminRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// Logged in, but not a super admin.
    Forbidden,
}

impl IntoResponse for SuperAdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin/login").into_response(),
            Self::Forbidden => (StatusCode::FORBIDDEN, Html(FORBIDDEN_PAGE)).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = SuperAdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(SuperAdminRejection::RedirectToLogin)?;

        let admin: CurrentAdmin = session
            .get(CURRENT_ADMIN_KEY)
            .await
            .ok()
            .flatten()
            .ok_or(SuperAdminRejection::RedirectToLogin)?;

        if admin.role != AdminRole::SuperAdmin {
            return Err(SuperAdminRejection::Forbidden);
        }

        Ok(Self(admin))
    }
}

/// Extractor that optionally reads the logged-in admin.
///
/// Unlike [`RequireAdmin`], never rejects; the login page uses this to
/// bounce already-authenticated visitors to the dashboard.
pub struct OptionalAdmin(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentAdmin>(CURRENT_ADMIN_KEY)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}
