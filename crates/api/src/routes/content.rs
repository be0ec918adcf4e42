//! Public content section endpoints.
//!
//! One pair of handlers serves all nine sections; the section slug in
//! the path picks the table.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use aurum_core::content::ContentSection;
use aurum_db::repositories::{ContentError, ContentRepository};

/// Creates the public content routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/{section}", get(list_section))
        .route("/api/{section}/{id}", get(get_record))
}

/// Query parameters for section listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum records to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_limit() -> u64 {
    20
}

/// GET `/api/{section}` - Newest records of one section.
async fn list_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let Ok(section) = section.parse::<ContentSection>() else {
        return unknown_section();
    };

    let repo = ContentRepository::new((*state.db).clone());

    match repo.list_recent(section, query.limit).await {
        Ok(records) => (StatusCode::OK, Json(json!(records))).into_response(),
        Err(e) => {
            error!(error = %e, section = %section, "Failed to list content");
            internal_error()
        }
    }
}

/// GET `/api/{section}/{id}` - One record by id.
async fn get_record(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, Uuid)>,
) -> Response {
    let Ok(section) = section.parse::<ContentSection>() else {
        return unknown_section();
    };

    let repo = ContentRepository::new((*state.db).clone());

    match repo.find_by_id(section, id).await {
        Ok(record) => (StatusCode::OK, Json(json!(record))).into_response(),
        Err(e @ ContentError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, section = %section, "Failed to load content record");
            internal_error()
        }
    }
}

fn unknown_section() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Not found"
        })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}
