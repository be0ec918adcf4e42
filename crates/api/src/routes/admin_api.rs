//! Admin JSON API under `/api/admin`.
//!
//! Login issues a JWT; everything else sits behind the bearer
//! middleware. Snapshot writes require the super admin role, and the
//! statistics payload is scoped to the caller's role.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthAdmin};
use aurum_core::auth::{AdminRole, verify_password};
use aurum_core::rates::{Purity, RateSheet, RateTriple, format_release_datetime, parse_release_datetime};
use aurum_db::{
    entities::gold_rates,
    repositories::{
        AdminUserRepository, ContactEnquiryRepository, CreateGoldRateInput, EnquiryError,
        GoldRateError, GoldRateRepository, sheet_of,
    },
};
use aurum_shared::auth::{LoginRequest, TokenResponse};

use super::directory::enquiry_response;

/// Creates the login route, the only admin API route without the JWT
/// middleware.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/api/admin/login", axum::routing::post(login))
}

/// Creates the JWT-protected admin API routes.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/verify-token", get(verify_token))
        .route(
            "/api/admin/gold-rates",
            get(list_rates).post(create_rate),
        )
        .route(
            "/api/admin/gold-rates/{id}",
            get(get_rate).put(update_rate).delete(delete_rate),
        )
        .route("/api/admin/statistics", get(statistics))
        .route("/api/admin/contact-enquiries", get(list_enquiries))
        .route(
            "/api/admin/contact-enquiries/{id}",
            get(get_enquiry).delete(delete_enquiry),
        )
}

/// Flat snapshot record for the admin surface.
///
/// Figures serialize as decimal strings, so nothing is rounded on the
/// way to the admin client.
#[derive(Debug, Serialize)]
pub struct AdminRateRecord {
    /// Snapshot id.
    pub id: Uuid,
    /// 24K selling rate.
    pub gold_24k_new_rate: Decimal,
    /// 24K exchange rate.
    pub gold_24k_exchange_rate: Decimal,
    /// 24K making charges.
    pub gold_24k_making_charges: Decimal,
    /// 22K selling rate.
    pub gold_22k_new_rate: Decimal,
    /// 22K exchange rate.
    pub gold_22k_exchange_rate: Decimal,
    /// 22K making charges.
    pub gold_22k_making_charges: Decimal,
    /// 18K selling rate.
    pub gold_18k_new_rate: Decimal,
    /// 18K exchange rate.
    pub gold_18k_exchange_rate: Decimal,
    /// 18K making charges.
    pub gold_18k_making_charges: Decimal,
    /// Release timestamp, `%Y-%m-%d %H:%M:%S`.
    pub release_datetime: String,
    /// Row creation timestamp, same format.
    pub created_at: String,
}

fn admin_rate_record(snapshot: &gold_rates::Model, tz: chrono_tz::Tz) -> AdminRateRecord {
    AdminRateRecord {
        id: snapshot.id,
        gold_24k_new_rate: snapshot.gold_24k_new_rate,
        gold_24k_exchange_rate: snapshot.gold_24k_exchange_rate,
        gold_24k_making_charges: snapshot.gold_24k_making_charges,
        gold_22k_new_rate: snapshot.gold_22k_new_rate,
        gold_22k_exchange_rate: snapshot.gold_22k_exchange_rate,
        gold_22k_making_charges: snapshot.gold_22k_making_charges,
        gold_18k_new_rate: snapshot.gold_18k_new_rate,
        gold_18k_exchange_rate: snapshot.gold_18k_exchange_rate,
        gold_18k_making_charges: snapshot.gold_18k_making_charges,
        release_datetime: format_release_datetime(snapshot.release_datetime),
        created_at: snapshot
            .created_at
            .with_timezone(&tz)
            .format(aurum_core::rates::RELEASE_DATETIME_FORMAT)
            .to_string(),
    }
}

/// Request body for creating a snapshot.
#[derive(Debug, Deserialize)]
pub struct CreateRateRequest {
    /// 24K selling rate.
    pub gold_24k_new_rate: Decimal,
    /// 24K exchange rate.
    pub gold_24k_exchange_rate: Decimal,
    /// 24K making charges.
    pub gold_24k_making_charges: Decimal,
    /// 22K selling rate.
    pub gold_22k_new_rate: Decimal,
    /// 22K exchange rate.
    pub gold_22k_exchange_rate: Decimal,
    /// 22K making charges.
    pub gold_22k_making_charges: Decimal,
    /// 18K selling rate.
    pub gold_18k_new_rate: Decimal,
    /// 18K exchange rate.
    pub gold_18k_exchange_rate: Decimal,
    /// 18K making charges.
    pub gold_18k_making_charges: Decimal,
    /// Release timestamp text, `YYYY-MM-DD HH:MM[:SS]`.
    pub release_datetime: String,
}

impl CreateRateRequest {
    fn sheet(&self) -> RateSheet {
        RateSheet {
            k24: RateTriple {
                selling: self.gold_24k_new_rate,
                exchange: self.gold_24k_exchange_rate,
                making: self.gold_24k_making_charges,
            },
            k22: RateTriple {
                selling: self.gold_22k_new_rate,
                exchange: self.gold_22k_exchange_rate,
                making: self.gold_22k_making_charges,
            },
            k18: RateTriple {
                selling: self.gold_18k_new_rate,
                exchange: self.gold_18k_exchange_rate,
                making: self.gold_18k_making_charges,
            },
        }
    }
}

/// Request body for updating a snapshot's nine figures.
///
/// The release timestamp is not editable through this endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateRateRequest {
    /// 24K selling rate.
    pub gold_24k_new_rate: Decimal,
    /// 24K exchange rate.
    pub gold_24k_exchange_rate: Decimal,
    /// 24K making charges.
    pub gold_24k_making_charges: Decimal,
    /// 22K selling rate.
    pub gold_22k_new_rate: Decimal,
    /// 22K exchange rate.
    pub gold_22k_exchange_rate: Decimal,
    /// 22K making charges.
    pub gold_22k_making_charges: Decimal,
    /// 18K selling rate.
    pub gold_18k_new_rate: Decimal,
    /// 18K exchange rate.
    pub gold_18k_exchange_rate: Decimal,
    /// 18K making charges.
    pub gold_18k_making_charges: Decimal,
}

impl UpdateRateRequest {
    fn sheet(&self) -> RateSheet {
        RateSheet {
            k24: RateTriple {
                selling: self.gold_24k_new_rate,
                exchange: self.gold_24k_exchange_rate,
                making: self.gold_24k_making_charges,
            },
            k22: RateTriple {
                selling: self.gold_22k_new_rate,
                exchange: self.gold_22k_exchange_rate,
                making: self.gold_22k_making_charges,
            },
            k18: RateTriple {
                selling: self.gold_18k_new_rate,
                exchange: self.gold_18k_exchange_rate,
                making: self.gold_18k_making_charges,
            },
        }
    }
}

/// POST `/api/admin/login` - Authenticate and issue an access token.
async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    let repo = AdminUserRepository::new((*state.db).clone());

    let admin = match repo.find_by_username(&payload.username).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            info!(username = %payload.username, "Login attempt for unknown admin");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error();
        }
    };

    match verify_password(&payload.password, &admin.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(admin_id = %admin.id, "Failed login attempt");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    let role: AdminRole = admin.role.into();
    match state
        .jwt_service
        .generate_access_token(&admin.username, admin.id, role.as_str())
    {
        Ok(token) => {
            info!(admin_id = %admin.id, "Admin logged in");
            (
                StatusCode::OK,
                Json(json!(TokenResponse::bearer(
                    token,
                    state.jwt_service.access_token_expires_in()
                ))),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            internal_error()
        }
    }
}

/// GET `/api/admin/verify-token` - Report the authenticated account.
async fn verify_token(admin: AuthAdmin) -> Json<serde_json::Value> {
    Json(json!({
        "valid": true,
        "user": {
            "id": admin.0.id,
            "username": admin.0.username,
            "role": admin.role().as_str(),
        }
    }))
}

/// GET `/api/admin/gold-rates` - Every snapshot, newest release first.
async fn list_rates(State(state): State<AppState>, _admin: AuthAdmin) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.list_all().await {
        Ok(snapshots) => {
            let records: Vec<AdminRateRecord> = snapshots
                .iter()
                .map(|snapshot| admin_rate_record(snapshot, state.timezone))
                .collect();

            (StatusCode::OK, Json(json!(records))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list gold rates");
            internal_error()
        }
    }
}

/// POST `/api/admin/gold-rates` - Create a snapshot. Super admin only.
async fn create_rate(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Json(payload): Json<CreateRateRequest>,
) -> Response {
    if let Err(response) = require_super_admin(&admin) {
        return response;
    }

    let release_datetime = match parse_release_datetime(&payload.release_datetime) {
        Ok(datetime) => datetime,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_release_datetime",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
    };

    let repo = GoldRateRepository::new((*state.db).clone());
    let input = CreateGoldRateInput {
        release_datetime,
        sheet: payload.sheet(),
    };

    match repo.create(input).await {
        Ok(snapshot) => {
            info!(
                snapshot_id = %snapshot.id,
                release = %snapshot.release_datetime,
                "Gold rate created"
            );

            (
                StatusCode::CREATED,
                Json(json!(admin_rate_record(&snapshot, state.timezone))),
            )
                .into_response()
        }
        Err(e @ GoldRateError::DuplicateReleaseTimestamp) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "duplicate_release_datetime",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create gold rate");
            internal_error()
        }
    }
}

/// GET `/api/admin/gold-rates/{id}` - One snapshot by id.
async fn get_rate(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(json!(admin_rate_record(&snapshot, state.timezone))),
        )
            .into_response(),
        Err(e @ GoldRateError::NotFound) => rate_not_found(&e),
        Err(e) => {
            error!(error = %e, "Failed to load gold rate");
            internal_error()
        }
    }
}

/// PUT `/api/admin/gold-rates/{id}` - Replace a snapshot's figures.
/// Super admin only.
async fn update_rate(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRateRequest>,
) -> Response {
    if let Err(response) = require_super_admin(&admin) {
        return response;
    }

    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.update_sheet(id, payload.sheet()).await {
        Ok(snapshot) => {
            info!(snapshot_id = %snapshot.id, "Gold rate updated");
            (
                StatusCode::OK,
                Json(json!(admin_rate_record(&snapshot, state.timezone))),
            )
                .into_response()
        }
        Err(e @ GoldRateError::NotFound) => rate_not_found(&e),
        Err(e) => {
            error!(error = %e, "Failed to update gold rate");
            internal_error()
        }
    }
}

/// DELETE `/api/admin/gold-rates/{id}` - Remove a snapshot. Super admin only.
async fn delete_rate(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = require_super_admin(&admin) {
        return response;
    }

    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(snapshot_id = %id, "Gold rate deleted");
            (
                StatusCode::OK,
                Json(json!({ "message": "Gold rate deleted successfully" })),
            )
                .into_response()
        }
        Err(e @ GoldRateError::NotFound) => rate_not_found(&e),
        Err(e) => {
            error!(error = %e, "Failed to delete gold rate");
            internal_error()
        }
    }
}

/// GET `/api/admin/statistics` - Role-scoped dashboard numbers.
///
/// Contact managers get the enquiry count and nothing else.
async fn statistics(State(state): State<AppState>, admin: AuthAdmin) -> Response {
    match admin.role() {
        AdminRole::ContactManager => {
            let enquiries = ContactEnquiryRepository::new((*state.db).clone());

            match enquiries.count().await {
                Ok(total) => {
                    (StatusCode::OK, Json(json!({ "total_enquiries": total }))).into_response()
                }
                Err(e) => {
                    error!(error = %e, "Failed to count enquiries");
                    internal_error()
                }
            }
        }
        AdminRole::SuperAdmin => super_admin_statistics(&state).await,
    }
}

async fn super_admin_statistics(state: &AppState) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    let total_rates = match repo.count().await {
        Ok(n) => n,
        Err(e) => {
            error!(error = %e, "Failed to count gold rates");
            return internal_error();
        }
    };

    let latest = match repo.latest_visible(state.local_now()).await {
        Ok(latest) => latest,
        Err(e) => {
            error!(error = %e, "Failed to load latest gold rates");
            return internal_error();
        }
    };

    let recent = match repo.recent(5).await {
        Ok(recent) => recent,
        Err(e) => {
            error!(error = %e, "Failed to load recent gold rates");
            return internal_error();
        }
    };

    let rates_by_purity = latest.map_or_else(
        || json!({}),
        |snapshot| {
            let sheet = sheet_of(&snapshot);
            let release = format_release_datetime(snapshot.release_datetime);
            let mut by_purity = serde_json::Map::new();

            for purity in Purity::ALL {
                let triple = sheet.triple(purity);
                by_purity.insert(
                    purity.label().to_string(),
                    json!({
                        "selling_rate": triple.selling,
                        "exchange_rate": triple.exchange,
                        "making_charges": triple.making,
                        "last_updated": release.as_str(),
                    }),
                );
            }

            serde_json::Value::Object(by_purity)
        },
    );

    let recent_updates: Vec<serde_json::Value> = recent
        .iter()
        .map(|snapshot| {
            json!({
                "id": snapshot.id,
                "release_datetime": format_release_datetime(snapshot.release_datetime),
                "created_at": snapshot
                    .created_at
                    .with_timezone(&state.timezone)
                    .format(aurum_core::rates::RELEASE_DATETIME_FORMAT)
                    .to_string(),
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "total_rates": total_rates,
            "rates_by_purity": rates_by_purity,
            "recent_updates": recent_updates,
        })),
    )
        .into_response()
}

/// Query parameters for the enquiry list.
#[derive(Debug, Deserialize)]
pub struct EnquiryListQuery {
    /// Maximum enquiries to return.
    #[serde(default = "default_enquiry_limit")]
    pub limit: u64,
}

const fn default_enquiry_limit() -> u64 {
    50
}

/// GET `/api/admin/contact-enquiries` - Newest enquiries, both roles.
async fn list_enquiries(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Query(query): Query<EnquiryListQuery>,
) -> Response {
    let repo = ContactEnquiryRepository::new((*state.db).clone());

    match repo.list_recent(query.limit).await {
        Ok(enquiries) => {
            let body: Vec<_> = enquiries.into_iter().map(enquiry_response).collect();
            (StatusCode::OK, Json(json!(body))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list contact enquiries");
            internal_error()
        }
    }
}

/// GET `/api/admin/contact-enquiries/{id}` - One enquiry, both roles.
async fn get_enquiry(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = ContactEnquiryRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(enquiry) => (StatusCode::OK, Json(json!(enquiry_response(enquiry)))).into_response(),
        Err(e @ EnquiryError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load contact enquiry");
            internal_error()
        }
    }
}

/// DELETE `/api/admin/contact-enquiries/{id}` - Remove an enquiry, both roles.
async fn delete_enquiry(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = ContactEnquiryRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(enquiry_id = %id, "Contact enquiry deleted");
            (
                StatusCode::OK,
                Json(json!({ "message": "Contact enquiry deleted successfully" })),
            )
                .into_response()
        }
        Err(e @ EnquiryError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete contact enquiry");
            internal_error()
        }
    }
}

// Helper functions

fn require_super_admin(admin: &AuthAdmin) -> Result<(), Response> {
    if admin.role() == AdminRole::SuperAdmin {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Super admin access required"
            })),
        )
            .into_response())
    }
}

fn rate_not_found(e: &GoldRateError) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": e.to_string()
        })),
    )
        .into_response()
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid username or password"
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_maps_to_sheet() {
        let request: CreateRateRequest = serde_json::from_value(json!({
            "gold_24k_new_rate": "7200.50",
            "gold_24k_exchange_rate": 6800,
            "gold_24k_making_charges": 800.25,
            "gold_22k_new_rate": "6600",
            "gold_22k_exchange_rate": "6200",
            "gold_22k_making_charges": "600",
            "gold_18k_new_rate": "5400",
            "gold_18k_exchange_rate": "5000",
            "gold_18k_making_charges": "400",
            "release_datetime": "2025-01-01 10:00:00"
        }))
        .unwrap();

        let sheet = request.sheet();
        assert_eq!(sheet.k24.selling, dec!(7200.50));
        assert_eq!(sheet.k24.exchange, dec!(6800));
        assert_eq!(sheet.k24.making, dec!(800.25));
        assert_eq!(sheet.k18.making, dec!(400));
    }

    #[test]
    fn test_admin_record_serializes_decimal_strings() {
        let snapshot = gold_rates::Model {
            id: Uuid::new_v4(),
            gold_24k_new_rate: dec!(7200.00),
            gold_24k_exchange_rate: dec!(6800.00),
            gold_24k_making_charges: dec!(800.00),
            gold_22k_new_rate: dec!(6600.00),
            gold_22k_exchange_rate: dec!(6200.00),
            gold_22k_making_charges: dec!(600.00),
            gold_18k_new_rate: dec!(5400.00),
            gold_18k_exchange_rate: dec!(5000.00),
            gold_18k_making_charges: dec!(400.00),
            release_datetime: chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            created_at: chrono::DateTime::parse_from_rfc3339("2025-01-01T09:30:00+05:30")
                .unwrap(),
        };

        let value =
            serde_json::to_value(admin_rate_record(&snapshot, chrono_tz::Asia::Kolkata)).unwrap();

        assert_eq!(value["gold_24k_new_rate"], json!("7200.00"));
        assert_eq!(value["release_datetime"], json!("2025-01-01 10:00:00"));
        assert_eq!(value["created_at"], json!("2025-01-01 09:30:00"));
    }
}
