//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The public read API under `/api`
//! - The JWT-gated admin JSON API under `/api/admin`
//! - The session-gated admin HTML surface under `/admin`
//! - Authentication middleware and extractors

pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use aurum_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Timezone used to interpret release timestamps.
    pub timezone: chrono_tz::Tz,
}

impl AppState {
    /// The current wall-clock time in the display timezone, without
    /// offset, matching how release timestamps are stored.
    #[must_use]
    pub fn local_now(&self) -> chrono::NaiveDateTime {
        chrono::Utc::now().with_timezone(&self.timezone).naive_local()
    }
}

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Router {
    Router::new()
        .merge(routes::public_routes())
        .merge(routes::admin_api_routes(state.clone()))
        .merge(routes::admin_page_routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
