//! HTTP middleware and request extractors.
//!
//! Two authentication schemes live side by side:
//!
//! - [`auth`] guards the JSON admin API with Bearer JWTs
//! - [`session`] guards the HTML admin pages with cookie sessions

pub mod auth;
pub mod session;

pub use auth::{AuthAdmin, auth_middleware};
pub use session::{
    CurrentAdmin, OptionalAdmin, RequireAdmin, RequireSuperAdmin, SESSION_COOKIE_NAME,
    create_session_layer, set_current_admin,
};
