//! Admin HTML pages for managing gold rate snapshots.
//!
//! Form fields arrive as text so a bad figure re-renders the form with
//! an inline error instead of a bare 422.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::RequireSuperAdmin;
use aurum_core::rates::{RateSheet, RateTriple, format_release_datetime, parse_release_datetime};
use aurum_db::{
    entities::gold_rates,
    repositories::{CreateGoldRateInput, GoldRateError, GoldRateRepository},
};

use super::admin_pages::{not_found_page, render};

/// Creates the gold rate admin page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/gold-rates", get(list_rates))
        .route("/admin/gold-rates/add", get(add_form).post(add))
        .route("/admin/gold-rates/edit/{id}", get(edit_form).post(edit))
        .route("/admin/gold-rates/delete/{id}", get(delete))
}

/// One snapshot row in the list table.
struct RateRow {
    id: Uuid,
    release_datetime: String,
    selling_24k: String,
    exchange_24k: String,
    making_24k: String,
    selling_22k: String,
    exchange_22k: String,
    making_22k: String,
    selling_18k: String,
    exchange_18k: String,
    making_18k: String,
}

#[derive(Template)]
#[template(path = "gold_rates/list.html")]
struct RateListTemplate {
    username: String,
    is_super_admin: bool,
    rates: Vec<RateRow>,
}

/// Form values, kept as entered so a failed submit re-renders what the
/// admin typed.
#[derive(Debug, Clone, Default, Deserialize)]
struct RateForm {
    release_datetime: String,
    gold_24k_new_rate: String,
    gold_24k_exchange_rate: String,
    gold_24k_making_charges: String,
    gold_22k_new_rate: String,
    gold_22k_exchange_rate: String,
    gold_22k_making_charges: String,
    gold_18k_new_rate: String,
    gold_18k_exchange_rate: String,
    gold_18k_making_charges: String,
}

#[derive(Template)]
#[template(path = "gold_rates/form.html")]
struct RateFormTemplate {
    username: String,
    is_super_admin: bool,
    title: &'static str,
    action: String,
    form: RateForm,
    error: Option<String>,
}

/// GET `/admin/gold-rates` - Every snapshot, newest release first.
async fn list_rates(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    let rates = match repo.list_all().await {
        Ok(snapshots) => snapshots.iter().map(rate_row).collect(),
        Err(e) => {
            error!(error = %e, "Failed to list gold rates");
            Vec::new()
        }
    };

    render(&RateListTemplate {
        username: admin.username,
        is_super_admin: true,
        rates,
    })
    .into_response()
}

/// GET `/admin/gold-rates/add` - Empty snapshot form.
async fn add_form(RequireSuperAdmin(admin): RequireSuperAdmin) -> Response {
    render(&RateFormTemplate {
        username: admin.username,
        is_super_admin: true,
        title: "Add Gold Rate",
        action: "/admin/gold-rates/add".to_string(),
        form: RateForm::default(),
        error: None,
    })
    .into_response()
}

/// POST `/admin/gold-rates/add` - Create a snapshot from the form.
async fn add(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Form(form): Form<RateForm>,
) -> Response {
    let (release_datetime, sheet) = match parse_form(&form) {
        Ok(parsed) => parsed,
        Err(message) => return add_form_with_error(admin.username, form, message),
    };

    let repo = GoldRateRepository::new((*state.db).clone());
    let input = CreateGoldRateInput {
        release_datetime,
        sheet,
    };

    match repo.create(input).await {
        Ok(snapshot) => {
            info!(snapshot_id = %snapshot.id, "Gold rate created from admin form");
            Redirect::to("/admin/gold-rates").into_response()
        }
        Err(e @ GoldRateError::DuplicateReleaseTimestamp) => {
            add_form_with_error(admin.username, form, e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Failed to create gold rate");
            add_form_with_error(
                admin.username,
                form,
                "Something went wrong. Please try again.".to_string(),
            )
        }
    }
}

/// GET `/admin/gold-rates/edit/{id}` - Form prefilled from a snapshot.
async fn edit_form(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(snapshot) => render(&RateFormTemplate {
            username: admin.username,
            is_super_admin: true,
            title: "Edit Gold Rate",
            action: format!("/admin/gold-rates/edit/{id}"),
            form: form_from_model(&snapshot),
            error: None,
        })
        .into_response(),
        Err(e @ GoldRateError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to load gold rate");
            Redirect::to("/admin/gold-rates").into_response()
        }
    }
}

/// POST `/admin/gold-rates/edit/{id}` - Replace a snapshot from the form.
async fn edit(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<Uuid>,
    Form(form): Form<RateForm>,
) -> Response {
    let (release_datetime, sheet) = match parse_form(&form) {
        Ok(parsed) => parsed,
        Err(message) => return edit_form_with_error(admin.username, id, form, message),
    };

    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.update(id, release_datetime, sheet).await {
        Ok(snapshot) => {
            info!(snapshot_id = %snapshot.id, "Gold rate updated from admin form");
            Redirect::to("/admin/gold-rates").into_response()
        }
        Err(e @ GoldRateError::DuplicateReleaseTimestamp) => {
            edit_form_with_error(admin.username, id, form, e.to_string())
        }
        Err(e @ GoldRateError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to update gold rate");
            edit_form_with_error(
                admin.username,
                id,
                form,
                "Something went wrong. Please try again.".to_string(),
            )
        }
    }
}

/// GET `/admin/gold-rates/delete/{id}` - Delete and return to the list.
async fn delete(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = GoldRateRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(snapshot_id = %id, "Gold rate deleted from admin list");
            Redirect::to("/admin/gold-rates").into_response()
        }
        Err(e @ GoldRateError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to delete gold rate");
            Redirect::to("/admin/gold-rates").into_response()
        }
    }
}

fn add_form_with_error(username: String, form: RateForm, message: String) -> Response {
    render(&RateFormTemplate {
        username,
        is_super_admin: true,
        title: "Add Gold Rate",
        action: "/admin/gold-rates/add".to_string(),
        form,
        error: Some(message),
    })
    .into_response()
}

fn edit_form_with_error(username: String, id: Uuid, form: RateForm, message: String) -> Response {
    render(&RateFormTemplate {
        username,
        is_super_admin: true,
        title: "Edit Gold Rate",
        action: format!("/admin/gold-rates/edit/{id}"),
        form,
        error: Some(message),
    })
    .into_response()
}

fn parse_form(form: &RateForm) -> Result<(NaiveDateTime, RateSheet), String> {
    let release_datetime =
        parse_release_datetime(&form.release_datetime).map_err(|e| e.to_string())?;

    let sheet = RateSheet {
        k24: RateTriple {
            selling: parse_figure(&form.gold_24k_new_rate, "24K selling rate")?,
            exchange: parse_figure(&form.gold_24k_exchange_rate, "24K exchange rate")?,
            making: parse_figure(&form.gold_24k_making_charges, "24K making charges")?,
        },
        k22: RateTriple {
            selling: parse_figure(&form.gold_22k_new_rate, "22K selling rate")?,
            exchange: parse_figure(&form.gold_22k_exchange_rate, "22K exchange rate")?,
            making: parse_figure(&form.gold_22k_making_charges, "22K making charges")?,
        },
        k18: RateTriple {
            selling: parse_figure(&form.gold_18k_new_rate, "18K selling rate")?,
            exchange: parse_figure(&form.gold_18k_exchange_rate, "18K exchange rate")?,
            making: parse_figure(&form.gold_18k_making_charges, "18K making charges")?,
        },
    };

    Ok((release_datetime, sheet))
}

fn parse_figure(value: &str, label: &str) -> Result<Decimal, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Enter a valid number for the {label}"))
}

fn form_from_model(snapshot: &gold_rates::Model) -> RateForm {
    RateForm {
        release_datetime: format_release_datetime(snapshot.release_datetime),
        gold_24k_new_rate: snapshot.gold_24k_new_rate.to_string(),
        gold_24k_exchange_rate: snapshot.gold_24k_exchange_rate.to_string(),
        gold_24k_making_charges: snapshot.gold_24k_making_charges.to_string(),
        gold_22k_new_rate: snapshot.gold_22k_new_rate.to_string(),
        gold_22k_exchange_rate: snapshot.gold_22k_exchange_rate.to_string(),
        gold_22k_making_charges: snapshot.gold_22k_making_charges.to_string(),
        gold_18k_new_rate: snapshot.gold_18k_new_rate.to_string(),
        gold_18k_exchange_rate: snapshot.gold_18k_exchange_rate.to_string(),
        gold_18k_making_charges: snapshot.gold_18k_making_charges.to_string(),
    }
}

fn rate_row(snapshot: &gold_rates::Model) -> RateRow {
    RateRow {
        id: snapshot.id,
        release_datetime: format_release_datetime(snapshot.release_datetime),
        selling_24k: snapshot.gold_24k_new_rate.to_string(),
        exchange_24k: snapshot.gold_24k_exchange_rate.to_string(),
        making_24k: snapshot.gold_24k_making_charges.to_string(),
        selling_22k: snapshot.gold_22k_new_rate.to_string(),
        exchange_22k: snapshot.gold_22k_exchange_rate.to_string(),
        making_22k: snapshot.gold_22k_making_charges.to_string(),
        selling_18k: snapshot.gold_18k_new_rate.to_string(),
        exchange_18k: snapshot.gold_18k_exchange_rate.to_string(),
        making_18k: snapshot.gold_18k_making_charges.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn filled_form() -> RateForm {
        RateForm {
            release_datetime: "2025-08-01 10:30".to_string(),
            gold_24k_new_rate: "7200.50".to_string(),
            gold_24k_exchange_rate: "6800".to_string(),
            gold_24k_making_charges: "800".to_string(),
            gold_22k_new_rate: "6600".to_string(),
            gold_22k_exchange_rate: "6200".to_string(),
            gold_22k_making_charges: "600".to_string(),
            gold_18k_new_rate: "5400".to_string(),
            gold_18k_exchange_rate: "5000".to_string(),
            gold_18k_making_charges: "400".to_string(),
        }
    }

    #[test]
    fn test_parse_form_accepts_valid_input() {
        let (release, sheet) = parse_form(&filled_form()).unwrap();

        assert_eq!(release.to_string(), "2025-08-01 10:30:00");
        assert_eq!(sheet.k24.selling, dec!(7200.50));
        assert_eq!(sheet.k18.making, dec!(400));
    }

    #[test]
    fn test_parse_form_accepts_datetime_local_separator() {
        let mut form = filled_form();
        form.release_datetime = "2025-08-01T10:30".to_string();

        let (release, _) = parse_form(&form).unwrap();
        assert_eq!(release.to_string(), "2025-08-01 10:30:00");
    }

    #[test]
    fn test_parse_form_rejects_bad_figure_with_field_name() {
        let mut form = filled_form();
        form.gold_22k_exchange_rate = "6,200".to_string();

        let message = parse_form(&form).unwrap_err();
        assert_eq!(message, "Enter a valid number for the 22K exchange rate");
    }

    #[test]
    fn test_parse_form_rejects_bad_release_text() {
        let mut form = filled_form();
        form.release_datetime = "yesterday".to_string();

        let message = parse_form(&form).unwrap_err();
        assert!(message.starts_with("invalid release datetime"));
    }

    #[test]
    fn test_form_round_trips_through_model() {
        let (release, sheet) = parse_form(&filled_form()).unwrap();
        let snapshot = gold_rates::Model {
            id: Uuid::new_v4(),
            gold_24k_new_rate: sheet.k24.selling,
            gold_24k_exchange_rate: sheet.k24.exchange,
            gold_24k_making_charges: sheet.k24.making,
            gold_22k_new_rate: sheet.k22.selling,
            gold_22k_exchange_rate: sheet.k22.exchange,
            gold_22k_making_charges: sheet.k22.making,
            gold_18k_new_rate: sheet.k18.selling,
            gold_18k_exchange_rate: sheet.k18.exchange,
            gold_18k_making_charges: sheet.k18.making,
            release_datetime: release,
            created_at: chrono::Utc::now().into(),
        };

        let form = form_from_model(&snapshot);
        assert_eq!(form.release_datetime, "2025-08-01 10:30:00");
        assert_eq!(form.gold_24k_new_rate, "7200.50");
    }
}
