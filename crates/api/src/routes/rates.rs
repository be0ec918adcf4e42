//! Public gold rate endpoints.
//!
//! Every endpoint is a read-only projection of the snapshot table.
//! "Latest" means the most recent snapshot whose release timestamp is
//! not after the current time in the display timezone; rows dated in
//! the future stay invisible until their release time arrives.

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
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use aurum_core::rates::{
    Purity, RELEASE_DATETIME_FORMAT, RateSheet, format_release_datetime, history_window,
};
use aurum_db::{
    entities::gold_rates,
    repositories::{GoldRateRepository, sheet_of},
};

/// Creates the public gold rate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/gold-rates/latest", get(latest_rates))
        .route("/api/gold-rates/current", get(current_rates))
        .route("/api/gold-rates/history/7d", get(history_7d))
        .route("/api/gold-rates/history/30d", get(history_30d))
        .route("/api/gold-rates/history/{purity}", get(history_by_purity))
        .route("/api/gold-rates/all", get(all_rates))
        .route("/api/gold-rates/purities", get(purities))
}

/// One purity's charges in the nested public shape.
#[derive(Debug, Serialize)]
pub struct PurityRates {
    /// Selling rate per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_rate: Decimal,
    /// Exchange rate per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
    /// Making charges per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub making_charges: Decimal,
}

/// All three purities keyed by their labels.
#[derive(Debug, Serialize)]
pub struct GoldRatesByPurity {
    /// 24K figures.
    #[serde(rename = "24K")]
    pub k24: PurityRates,
    /// 22K figures.
    #[serde(rename = "22K")]
    pub k22: PurityRates,
    /// 18K figures.
    #[serde(rename = "18K")]
    pub k18: PurityRates,
}

/// A snapshot in the nested public shape.
#[derive(Debug, Serialize)]
pub struct RatePayload {
    /// Release timestamp, `%Y-%m-%d %H:%M:%S`.
    pub release_datetime: String,
    /// Row creation timestamp, same format.
    pub created_at: String,
    /// Per-purity figures.
    pub gold_rates: GoldRatesByPurity,
}

/// A page entry for `/all`: the nested shape plus the row id.
#[derive(Debug, Serialize)]
pub struct RateRecord {
    /// Snapshot id.
    pub id: Uuid,
    /// Release timestamp.
    pub release_datetime: String,
    /// Row creation timestamp.
    pub created_at: String,
    /// Per-purity figures.
    pub gold_rates: GoldRatesByPurity,
}

/// One purity's charges in the simplified `/current` shape.
#[derive(Debug, Serialize)]
pub struct SimpleTriple {
    /// Selling rate per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub selling: Decimal,
    /// Exchange rate per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange: Decimal,
    /// Making charges per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub making: Decimal,
}

/// All three purities keyed by their slugs.
#[derive(Debug, Serialize)]
pub struct SimpleRates {
    /// 24K figures.
    #[serde(rename = "24k_gold")]
    pub k24: SimpleTriple,
    /// 22K figures.
    #[serde(rename = "22k_gold")]
    pub k22: SimpleTriple,
    /// 18K figures.
    #[serde(rename = "18k_gold")]
    pub k18: SimpleTriple,
}

/// The `/current` response.
#[derive(Debug, Serialize)]
pub struct CurrentRates {
    /// Release timestamp of the snapshot served.
    pub last_updated: String,
    /// Per-purity figures in the simplified shape.
    pub rates: SimpleRates,
}

/// A purity-filtered history row.
#[derive(Debug, Serialize)]
pub struct PurityHistoryEntry {
    /// Purity label.
    pub purity: &'static str,
    /// Selling rate per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_rate: Decimal,
    /// Exchange rate per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
    /// Making charges per gram.
    #[serde(with = "rust_decimal::serde::float")]
    pub making_charges: Decimal,
    /// Release timestamp.
    pub release_datetime: String,
}

/// Pagination envelope for `/all`.
#[derive(Debug, Serialize)]
pub struct PaginationInfo {
    /// 1-based page served.
    pub current_page: u32,
    /// Total pages at this page size.
    pub total_pages: u64,
    /// Total snapshot count.
    pub total_records: u64,
    /// Page size used.
    pub records_per_page: u32,
    /// True when a later page exists.
    pub has_next: bool,
    /// True when an earlier page exists.
    pub has_previous: bool,
}

/// Query parameters for `/all`.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Page number, 1-based.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Records per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

const fn default_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    10
}

/// Query parameters for the purity-filtered history.
#[derive(Debug, Deserialize)]
pub struct PurityHistoryQuery {
    /// Days to look back.
    #[serde(default = "default_days")]
    pub days: u32,
}

const fn default_days() -> u32 {
    7
}

/// GET `/api/gold-rates/latest` - Latest visible snapshot, all purities.
async fn latest_rates(State(state): State<AppState>) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.latest_visible(state.local_now()).await {
        Ok(Some(snapshot)) => (
            StatusCode::OK,
            Json(json!(rate_payload(&snapshot, state.timezone))),
        )
            .into_response(),
        Ok(None) => no_rates_response(),
        Err(e) => {
            error!(error = %e, "Failed to load latest gold rates");
            internal_error()
        }
    }
}

/// GET `/api/gold-rates/current` - Latest visible snapshot, simplified shape.
async fn current_rates(State(state): State<AppState>) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.latest_visible(state.local_now()).await {
        Ok(Some(snapshot)) => (
            StatusCode::OK,
            Json(json!(current_payload(&snapshot))),
        )
            .into_response(),
        Ok(None) => no_rates_response(),
        Err(e) => {
            error!(error = %e, "Failed to load current gold rates");
            internal_error()
        }
    }
}

/// GET `/api/gold-rates/history/7d` - Last week of snapshots.
async fn history_7d(State(state): State<AppState>) -> Response {
    history_response(&state, 7).await
}

/// GET `/api/gold-rates/history/30d` - Last month of snapshots.
async fn history_30d(State(state): State<AppState>) -> Response {
    history_response(&state, 30).await
}

async fn history_response(state: &AppState, days: u32) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());
    let (start, end) = history_window(state.local_now(), days);

    match repo.history(start, end).await {
        Ok(snapshots) => {
            let entries: Vec<RatePayload> = snapshots
                .iter()
                .map(|snapshot| rate_payload(snapshot, state.timezone))
                .collect();

            (StatusCode::OK, Json(json!(entries))).into_response()
        }
        Err(e) => {
            error!(error = %e, days, "Failed to load gold rate history");
            internal_error()
        }
    }
}

/// GET `/api/gold-rates/history/{purity}` - One purity's history, flattened.
async fn history_by_purity(
    State(state): State<AppState>,
    Path(purity): Path<String>,
    Query(query): Query<PurityHistoryQuery>,
) -> Response {
    let Ok(purity) = purity.parse::<Purity>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_purity",
                "message": "Invalid purity. Must be 24K, 22K, or 18K"
            })),
        )
            .into_response();
    };

    let repo = GoldRateRepository::new((*state.db).clone());
    let (start, end) = history_window(state.local_now(), query.days);

    match repo.history(start, end).await {
        Ok(snapshots) => {
            let entries: Vec<PurityHistoryEntry> = snapshots
                .iter()
                .map(|snapshot| purity_entry(snapshot, purity))
                .collect();

            (StatusCode::OK, Json(json!(entries))).into_response()
        }
        Err(e) => {
            error!(error = %e, purity = %purity, "Failed to load purity history");
            internal_error()
        }
    }
}

/// GET `/api/gold-rates/all` - Every snapshot, paginated.
async fn all_rates(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.page(query.page, query.limit).await {
        Ok((snapshots, total)) => {
            let data: Vec<RateRecord> = snapshots
                .iter()
                .map(|snapshot| rate_record(snapshot, state.timezone))
                .collect();

            (
                StatusCode::OK,
                Json(json!({
                    "pagination": pagination_info(query.page, query.limit, total),
                    "data": data,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to page gold rates");
            internal_error()
        }
    }
}

/// GET `/api/gold-rates/purities` - The purity labels the API serves.
async fn purities() -> Json<[&'static str; 3]> {
    Json(Purity::ALL.map(|purity| purity.label()))
}

fn no_rates_response() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "message": "No gold rates available" })),
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

// Payload builders, kept pure so the shapes can be tested without a
// database.

fn purity_rates(sheet: &RateSheet, purity: Purity) -> PurityRates {
    let triple = sheet.triple(purity);
    PurityRates {
        selling_rate: triple.selling,
        exchange_rate: triple.exchange,
        making_charges: triple.making,
    }
}

fn gold_rates_by_purity(sheet: &RateSheet) -> GoldRatesByPurity {
    GoldRatesByPurity {
        k24: purity_rates(sheet, Purity::K24),
        k22: purity_rates(sheet, Purity::K22),
        k18: purity_rates(sheet, Purity::K18),
    }
}

fn created_at_string(snapshot: &gold_rates::Model, tz: chrono_tz::Tz) -> String {
    snapshot
        .created_at
        .with_timezone(&tz)
        .format(RELEASE_DATETIME_FORMAT)
        .to_string()
}

fn rate_payload(snapshot: &gold_rates::Model, tz: chrono_tz::Tz) -> RatePayload {
    RatePayload {
        release_datetime: format_release_datetime(snapshot.release_datetime),
        created_at: created_at_string(snapshot, tz),
        gold_rates: gold_rates_by_purity(&sheet_of(snapshot)),
    }
}

fn rate_record(snapshot: &gold_rates::Model, tz: chrono_tz::Tz) -> RateRecord {
    RateRecord {
        id: snapshot.id,
        release_datetime: format_release_datetime(snapshot.release_datetime),
        created_at: created_at_string(snapshot, tz),
        gold_rates: gold_rates_by_purity(&sheet_of(snapshot)),
    }
}

fn current_payload(snapshot: &gold_rates::Model) -> CurrentRates {
    let sheet = sheet_of(snapshot);
    let simple = |purity: Purity| {
        let triple = sheet.triple(purity);
        SimpleTriple {
            selling: triple.selling,
            exchange: triple.exchange,
            making: triple.making,
        }
    };

    CurrentRates {
        last_updated: format_release_datetime(snapshot.release_datetime),
        rates: SimpleRates {
            k24: simple(Purity::K24),
            k22: simple(Purity::K22),
            k18: simple(Purity::K18),
        },
    }
}

fn purity_entry(snapshot: &gold_rates::Model, purity: Purity) -> PurityHistoryEntry {
    let triple = sheet_of(snapshot).triple(purity);
    PurityHistoryEntry {
        purity: purity.label(),
        selling_rate: triple.selling,
        exchange_rate: triple.exchange,
        making_charges: triple.making,
        release_datetime: format_release_datetime(snapshot.release_datetime),
    }
}

fn pagination_info(page: u32, limit: u32, total: u64) -> PaginationInfo {
    let page = page.max(1);
    let limit = limit.max(1);
    let total_pages = total.div_ceil(u64::from(limit));

    PaginationInfo {
        current_page: page,
        total_pages,
        total_records: total,
        records_per_page: limit,
        has_next: u64::from(page) < total_pages,
        has_previous: page > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn sample_snapshot() -> gold_rates::Model {
        gold_rates::Model {
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
            release_datetime: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            created_at: chrono::DateTime::parse_from_rfc3339("2025-01-01T09:30:00+05:30")
                .unwrap(),
        }
    }

    #[test]
    fn test_nested_payload_shape() {
        let value = serde_json::to_value(rate_payload(
            &sample_snapshot(),
            chrono_tz::Asia::Kolkata,
        ))
        .unwrap();

        assert_eq!(value["release_datetime"], json!("2025-01-01 10:00:00"));
        assert_eq!(value["created_at"], json!("2025-01-01 09:30:00"));
        assert_eq!(value["gold_rates"]["24K"]["selling_rate"], json!(7200.0));
        assert_eq!(value["gold_rates"]["22K"]["exchange_rate"], json!(6200.0));
        assert_eq!(value["gold_rates"]["18K"]["making_charges"], json!(400.0));
    }

    #[test]
    fn test_current_payload_shape() {
        let value = serde_json::to_value(current_payload(&sample_snapshot())).unwrap();

        assert_eq!(value["last_updated"], json!("2025-01-01 10:00:00"));
        assert_eq!(value["rates"]["24k_gold"]["selling"], json!(7200.0));
        assert_eq!(value["rates"]["22k_gold"]["exchange"], json!(6200.0));
        assert_eq!(value["rates"]["18k_gold"]["making"], json!(400.0));
    }

    #[test]
    fn test_purity_entry_flattens_one_purity() {
        let value =
            serde_json::to_value(purity_entry(&sample_snapshot(), Purity::K22)).unwrap();

        assert_eq!(value["purity"], json!("22K"));
        assert_eq!(value["selling_rate"], json!(6600.0));
        assert_eq!(value["exchange_rate"], json!(6200.0));
        assert_eq!(value["making_charges"], json!(600.0));
        assert_eq!(value["release_datetime"], json!("2025-01-01 10:00:00"));
    }

    #[test]
    fn test_record_includes_id() {
        let snapshot = sample_snapshot();
        let value =
            serde_json::to_value(rate_record(&snapshot, chrono_tz::Asia::Kolkata)).unwrap();

        assert_eq!(value["id"], json!(snapshot.id));
        assert_eq!(value["gold_rates"]["24K"]["selling_rate"], json!(7200.0));
    }

    #[rstest]
    #[case(1, 10, 0, 0, false, false)]
    #[case(1, 10, 25, 3, true, false)]
    #[case(3, 10, 25, 3, false, true)]
    #[case(2, 10, 20, 2, false, true)]
    #[case(1, 10, 10, 1, false, false)]
    fn test_pagination_math(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] total: u64,
        #[case] expected_pages: u64,
        #[case] has_next: bool,
        #[case] has_previous: bool,
    ) {
        let info = pagination_info(page, limit, total);

        assert_eq!(info.total_pages, expected_pages);
        assert_eq!(info.has_next, has_next);
        assert_eq!(info.has_previous, has_previous);
        assert_eq!(info.total_records, total);
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let info = pagination_info(0, 0, 5);

        assert_eq!(info.current_page, 1);
        assert_eq!(info.records_per_page, 1);
        assert_eq!(info.total_pages, 5);
    }

    proptest! {
        #[test]
        fn prop_pagination_is_ceiling_division(
            page in 1u32..1000,
            limit in 1u32..100,
            total in 0u64..100_000,
        ) {
            let info = pagination_info(page, limit, total);

            let limit = u64::from(limit);
            prop_assert_eq!(info.total_pages, total.div_ceil(limit));
            prop_assert_eq!(info.has_next, u64::from(page) < info.total_pages);
            prop_assert_eq!(info.has_previous, page > 1);
            // Every record lands on exactly one page.
            prop_assert!(info.total_pages * limit >= total);
            prop_assert!(info.total_pages.saturating_sub(1) * limit < total || total == 0);
        }
    }
}
