//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod admin_api;
pub mod admin_content;
pub mod admin_enquiries;
pub mod admin_pages;
pub mod admin_rates;
pub mod admin_stores;
pub mod content;
pub mod directory;
pub mod health;
pub mod rates;

/// Creates the public JSON router under `/api`.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(rates::routes())
        .merge(directory::routes())
        .merge(content::routes())
}

/// Creates the admin JSON router under `/api/admin`.
///
/// Everything except login sits behind the JWT middleware, which needs
/// state to re-check the token subject against the database.
#[allow(clippy::needless_pass_by_value)]
pub fn admin_api_routes(state: AppState) -> Router<AppState> {
    let protected = admin_api::protected_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    Router::new().merge(admin_api::login_routes()).merge(protected)
}

/// Creates the session-gated admin HTML router under `/admin`.
pub fn admin_page_routes() -> Router<AppState> {
    Router::new()
        .merge(admin_pages::routes())
        .merge(admin_rates::routes())
        .merge(admin_stores::routes())
        .merge(admin_enquiries::routes())
        .merge(admin_content::routes())
}
