//! Session-gated admin HTML pages: login, logout, and the dashboard.
//!
//! Login failures re-render the form with an inline error instead of
//! returning an error status, so the browser stays on the page.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info};

use crate::AppState;
use crate::middleware::{CurrentAdmin, OptionalAdmin, RequireAdmin, set_current_admin};
use aurum_core::auth::{AdminRole, verify_password};
use aurum_core::content::ContentSection;
use aurum_core::rates::format_release_datetime;
use aurum_db::{
    entities::gold_rates,
    repositories::{
        AdminUserRepository, ContactEnquiryRepository, ContentRepository, GoldRateRepository,
        StoreRepository,
    },
};

/// Creates the login, logout, and dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/logout", get(logout))
        .route("/admin", get(dashboard))
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
}

/// One snapshot row in the dashboard's recent-rates table.
struct DashboardRate {
    release_datetime: String,
    selling_24k: String,
    selling_22k: String,
    selling_18k: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    username: String,
    is_super_admin: bool,
    total_rates: u64,
    total_stores: u64,
    total_enquiries: u64,
    total_guides: u64,
    latest_rates: Vec<DashboardRate>,
}

/// Renders a page template, degrading to a plain error body when the
/// template fails.
pub(crate) fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        error!(error = %e, "Template render error");
        "Internal Server Error".to_string()
    }))
}

/// Builds the admin 404 page.
pub(crate) fn not_found_page(message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>404 Not Found</title></head>\n\
         <body>\n<h1>404 Not Found</h1>\n<p>{message}</p>\n\
         <p><a href=\"/admin\">Back to dashboard</a></p>\n</body>\n</html>\n"
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// GET `/admin/login` - Login form, or straight to the dashboard when
/// already signed in.
async fn login_page(OptionalAdmin(admin): OptionalAdmin) -> Response {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }

    render(&LoginTemplate { error: None }).into_response()
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

/// POST `/admin/login` - Check credentials and establish the session.
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let repo = AdminUserRepository::new((*state.db).clone());

    let admin = match repo.find_by_username(&form.username).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            info!(username = %form.username, "Login attempt for unknown admin");
            return login_failed();
        }
        Err(e) => {
            error!(error = %e, "Database error during admin login");
            return login_retry();
        }
    };

    match verify_password(&form.password, &admin.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(admin_id = %admin.id, "Failed admin login attempt");
            return login_failed();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return login_retry();
        }
    }

    let role: AdminRole = admin.role.into();
    let access_token = match state
        .jwt_service
        .generate_access_token(&admin.username, admin.id, role.as_str())
    {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate access token at login");
            return login_retry();
        }
    };

    let current = CurrentAdmin {
        user_id: admin.id,
        username: admin.username,
        role,
        access_token,
    };

    if let Err(e) = set_current_admin(&session, &current).await {
        error!(error = %e, "Failed to persist admin session");
        return login_retry();
    }

    info!(admin_id = %current.user_id, "Admin logged in");
    Redirect::to("/admin").into_response()
}

fn login_failed() -> Response {
    render(&LoginTemplate {
        error: Some("Invalid username or password".to_string()),
    })
    .into_response()
}

fn login_retry() -> Response {
    render(&LoginTemplate {
        error: Some("Something went wrong. Please try again.".to_string()),
    })
    .into_response()
}

/// GET `/admin/logout` - Drop the session and return to the login page.
async fn logout(session: Session) -> Redirect {
    if let Err(e) = session.flush().await {
        error!(error = %e, "Failed to clear admin session");
    }

    Redirect::to("/admin/login")
}

/// GET `/admin` - Dashboard.
///
/// Contact managers get only the enquiry count; the remaining totals
/// and the recent-rates table are super admin data.
async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Html<String> {
    let enquiries = ContactEnquiryRepository::new((*state.db).clone());
    let total_enquiries = count_or_zero(enquiries.count().await, "enquiries");

    if admin.role != AdminRole::SuperAdmin {
        return render(&DashboardTemplate {
            username: admin.username,
            is_super_admin: false,
            total_rates: 0,
            total_stores: 0,
            total_enquiries,
            total_guides: 0,
            latest_rates: Vec::new(),
        });
    }

    let rates = GoldRateRepository::new((*state.db).clone());
    let stores = StoreRepository::new((*state.db).clone());
    let content = ContentRepository::new((*state.db).clone());

    let total_rates = count_or_zero(rates.count().await, "gold rates");
    let total_stores = count_or_zero(stores.count().await, "stores");
    let total_guides = count_or_zero(content.count(ContentSection::Guides).await, "guides");

    let latest_rates = match rates.recent(5).await {
        Ok(snapshots) => snapshots.iter().map(dashboard_rate).collect(),
        Err(e) => {
            error!(error = %e, "Failed to load recent gold rates");
            Vec::new()
        }
    };

    render(&DashboardTemplate {
        username: admin.username,
        is_super_admin: true,
        total_rates,
        total_stores,
        total_enquiries,
        total_guides,
        latest_rates,
    })
}

fn count_or_zero<E: std::fmt::Display>(result: Result<u64, E>, what: &str) -> u64 {
    result.unwrap_or_else(|e| {
        error!(error = %e, "Failed to count {what}");
        0
    })
}

fn dashboard_rate(snapshot: &gold_rates::Model) -> DashboardRate {
    DashboardRate {
        release_datetime: format_release_datetime(snapshot.release_datetime),
        selling_24k: snapshot.gold_24k_new_rate.to_string(),
        selling_22k: snapshot.gold_22k_new_rate.to_string(),
        selling_18k: snapshot.gold_18k_new_rate.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_dashboard_rate_shows_selling_figures() {
        let snapshot = gold_rates::Model {
            id: Uuid::new_v4(),
            gold_24k_new_rate: dec!(7200.50),
            gold_24k_exchange_rate: dec!(6800.00),
            gold_24k_making_charges: dec!(800.00),
            gold_22k_new_rate: dec!(6600.00),
            gold_22k_exchange_rate: dec!(6200.00),
            gold_22k_making_charges: dec!(600.00),
            gold_18k_new_rate: dec!(5400.00),
            gold_18k_exchange_rate: dec!(5000.00),
            gold_18k_making_charges: dec!(400.00),
            release_datetime: chrono::NaiveDate::from_ymd_opt(2025, 8, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            created_at: chrono::Utc::now().into(),
        };

        let row = dashboard_rate(&snapshot);

        assert_eq!(row.release_datetime, "2025-08-01 10:30:00");
        assert_eq!(row.selling_24k, "7200.50");
        assert_eq!(row.selling_22k, "6600.00");
        assert_eq!(row.selling_18k, "5400.00");
    }
}
