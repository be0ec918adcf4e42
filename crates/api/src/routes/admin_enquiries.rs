//! Admin HTML pages for contact enquiries.
//!
//! Open to both roles; this is the surface a contact manager logs in
//! for.

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::RequireAdmin;
use aurum_core::auth::AdminRole;
use aurum_core::rates::RELEASE_DATETIME_FORMAT;
use aurum_db::{
    entities::contact_enquiries,
    repositories::{ContactEnquiryRepository, EnquiryError},
};

use super::admin_pages::{not_found_page, render};

/// Creates the contact enquiry admin page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/contact-enquiries", get(list_enquiries))
        .route("/admin/contact-enquiries/view/{id}", get(view_enquiry))
        .route("/admin/contact-enquiries/delete/{id}", get(delete_enquiry))
}

/// One enquiry row in the list table.
struct EnquiryRow {
    id: Uuid,
    name: String,
    phone_number: String,
    subject: String,
    preferred_store: String,
    created_at: String,
}

#[derive(Template)]
#[template(path = "enquiries/list.html")]
struct EnquiryListTemplate {
    username: String,
    is_super_admin: bool,
    enquiries: Vec<EnquiryRow>,
}

/// Full enquiry detail for the view page.
struct EnquiryDetail {
    id: Uuid,
    name: String,
    phone_number: String,
    email: String,
    subject: String,
    preferred_store: String,
    preferred_date_time: String,
    no_of_people: i32,
    message: String,
    created_at: String,
}

#[derive(Template)]
#[template(path = "enquiries/view.html")]
struct EnquiryViewTemplate {
    username: String,
    is_super_admin: bool,
    enquiry: EnquiryDetail,
}

/// GET `/admin/contact-enquiries` - Every enquiry, newest first.
async fn list_enquiries(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Response {
    let repo = ContactEnquiryRepository::new((*state.db).clone());

    let enquiries = match repo.list().await {
        Ok(enquiries) => enquiries
            .iter()
            .map(|enquiry| enquiry_row(enquiry, state.timezone))
            .collect(),
        Err(e) => {
            error!(error = %e, "Failed to list contact enquiries");
            Vec::new()
        }
    };

    render(&EnquiryListTemplate {
        username: admin.username,
        is_super_admin: admin.role == AdminRole::SuperAdmin,
        enquiries,
    })
    .into_response()
}

/// GET `/admin/contact-enquiries/view/{id}` - One enquiry in full.
async fn view_enquiry(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = ContactEnquiryRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(enquiry) => render(&EnquiryViewTemplate {
            username: admin.username,
            is_super_admin: admin.role == AdminRole::SuperAdmin,
            enquiry: enquiry_detail(enquiry, state.timezone),
        })
        .into_response(),
        Err(e @ EnquiryError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to load contact enquiry");
            Redirect::to("/admin/contact-enquiries").into_response()
        }
    }
}

/// GET `/admin/contact-enquiries/delete/{id}` - Delete and return to the
/// list.
async fn delete_enquiry(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = ContactEnquiryRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(enquiry_id = %id, "Contact enquiry deleted from admin list");
            Redirect::to("/admin/contact-enquiries").into_response()
        }
        Err(e @ EnquiryError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to delete contact enquiry");
            Redirect::to("/admin/contact-enquiries").into_response()
        }
    }
}

fn filed_at(enquiry: &contact_enquiries::Model, tz: chrono_tz::Tz) -> String {
    enquiry
        .created_at
        .with_timezone(&tz)
        .format(RELEASE_DATETIME_FORMAT)
        .to_string()
}

fn enquiry_row(enquiry: &contact_enquiries::Model, tz: chrono_tz::Tz) -> EnquiryRow {
    EnquiryRow {
        id: enquiry.id,
        name: enquiry.name.clone(),
        phone_number: enquiry.phone_number.clone(),
        subject: enquiry.subject.clone(),
        preferred_store: enquiry.preferred_store.clone(),
        created_at: filed_at(enquiry, tz),
    }
}

fn enquiry_detail(enquiry: contact_enquiries::Model, tz: chrono_tz::Tz) -> EnquiryDetail {
    let created_at = filed_at(&enquiry, tz);

    EnquiryDetail {
        id: enquiry.id,
        name: enquiry.name,
        phone_number: enquiry.phone_number,
        email: enquiry.email,
        subject: enquiry.subject,
        preferred_store: enquiry.preferred_store,
        preferred_date_time: enquiry.preferred_date_time,
        no_of_people: enquiry.no_of_people,
        message: enquiry.message.unwrap_or_else(|| "-".to_string()),
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_formats_timestamp_in_display_timezone() {
        let enquiry = contact_enquiries::Model {
            id: Uuid::new_v4(),
            name: "Priya Sharma".to_string(),
            phone_number: "+919876543210".to_string(),
            email: "priya@example.com".to_string(),
            subject: "Wedding jewellery".to_string(),
            preferred_store: "Anand Jewels - Main Branch".to_string(),
            preferred_date_time: "Saturday afternoon".to_string(),
            no_of_people: 3,
            message: None,
            created_at: chrono::DateTime::parse_from_rfc3339("2025-08-01T04:30:00Z").unwrap(),
        };

        let detail = enquiry_detail(enquiry, chrono_tz::Asia::Kolkata);

        assert_eq!(detail.created_at, "2025-08-01 10:00:00");
        assert_eq!(detail.message, "-");
    }
}
