//! Public store directory and contact enquiry endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use aurum_db::{
    entities::{contact_enquiries, stores},
    repositories::{
        ContactEnquiryRepository, CreateEnquiryInput, EnquiryError, StoreError, StoreRepository,
    },
};

/// Creates the public directory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/stores", get(list_stores))
        .route("/api/stores/{id}", get(get_store))
        .route("/api/contact-enquiries", post(create_enquiry))
}

/// Public projection of a store row.
///
/// Phone and link columns are admin-surface data and stay out of the
/// public payload.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    /// Store id.
    pub id: Uuid,
    /// Branch name.
    pub store_name: String,
    /// Street address.
    pub store_address: String,
    /// Optional image path.
    pub store_image: Option<String>,
    /// Opening hours.
    pub timings: String,
    /// Row creation timestamp.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

fn store_response(store: stores::Model) -> StoreResponse {
    StoreResponse {
        id: store.id,
        store_name: store.store_name,
        store_address: store.store_address,
        store_image: store.store_image,
        timings: store.timings,
        created_at: store.created_at,
    }
}

/// Request body for filing a contact enquiry.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEnquiryRequest {
    /// Customer's full name.
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    /// Phone number with country code.
    #[validate(length(min = 10, max = 15))]
    pub phone_number: String,
    /// Contact email address.
    #[validate(email)]
    pub email: String,
    /// What the visit is about.
    #[validate(length(min = 2, max = 200))]
    pub subject: String,
    /// Name of the preferred store.
    #[validate(length(min = 5, max = 200))]
    pub preferred_store: String,
    /// Preferred appointment date and time, free text.
    #[validate(length(min = 10, max = 100))]
    pub preferred_date_time: String,
    /// Party size.
    #[validate(range(min = 1))]
    #[serde(default = "default_people")]
    pub no_of_people: i32,
    /// Optional free-text message.
    pub message: Option<String>,
}

const fn default_people() -> i32 {
    1
}

/// Echo of a stored enquiry row.
#[derive(Debug, Serialize)]
pub struct EnquiryResponse {
    /// Enquiry id.
    pub id: Uuid,
    /// Customer's full name.
    pub name: String,
    /// Phone number.
    pub phone_number: String,
    /// Email address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Preferred store name.
    pub preferred_store: String,
    /// Preferred appointment slot.
    pub preferred_date_time: String,
    /// Party size.
    pub no_of_people: i32,
    /// Optional message.
    pub message: Option<String>,
    /// Row creation timestamp.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Maps an enquiry row to its wire shape; the admin API reuses this.
pub fn enquiry_response(enquiry: contact_enquiries::Model) -> EnquiryResponse {
    EnquiryResponse {
        id: enquiry.id,
        name: enquiry.name,
        phone_number: enquiry.phone_number,
        email: enquiry.email,
        subject: enquiry.subject,
        preferred_store: enquiry.preferred_store,
        preferred_date_time: enquiry.preferred_date_time,
        no_of_people: enquiry.no_of_people,
        message: enquiry.message,
        created_at: enquiry.created_at,
    }
}

/// GET `/api/stores` - All branches, newest first.
async fn list_stores(State(state): State<AppState>) -> Response {
    let repo = StoreRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(stores) => {
            let body: Vec<StoreResponse> = stores.into_iter().map(store_response).collect();
            (StatusCode::OK, Json(json!(body))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list stores");
            internal_error()
        }
    }
}

/// GET `/api/stores/{id}` - One branch by id.
async fn get_store(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let repo = StoreRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(store) => (StatusCode::OK, Json(json!(store_response(store)))).into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Store not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load store");
            internal_error()
        }
    }
}

/// POST `/api/contact-enquiries` - File an appointment enquiry.
async fn create_enquiry(
    State(state): State<AppState>,
    Json(payload): Json<CreateEnquiryRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_failed",
                "message": e.to_string()
            })),
        )
            .into_response();
    }

    let repo = ContactEnquiryRepository::new((*state.db).clone());

    let input = CreateEnquiryInput {
        name: payload.name,
        phone_number: payload.phone_number,
        email: payload.email,
        subject: payload.subject,
        preferred_store: payload.preferred_store,
        preferred_date_time: payload.preferred_date_time,
        no_of_people: payload.no_of_people,
        message: payload.message,
    };

    match repo.create(input).await {
        Ok(enquiry) => {
            info!(
                enquiry_id = %enquiry.id,
                store = %enquiry.preferred_store,
                "Contact enquiry filed"
            );

            (StatusCode::CREATED, Json(json!(enquiry_response(enquiry)))).into_response()
        }
        Err(e @ EnquiryError::UnknownStore { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_store",
                "message": e.to_string()
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to file contact enquiry");
            internal_error()
        }
    }
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
    use rstest::rstest;

    fn valid_request() -> CreateEnquiryRequest {
        CreateEnquiryRequest {
            name: "Priya Sharma".to_string(),
            phone_number: "+919876543210".to_string(),
            email: "priya@example.com".to_string(),
            subject: "Wedding collection".to_string(),
            preferred_store: "Anand Jewels - Main Branch".to_string(),
            preferred_date_time: "2025-02-14 11:00".to_string(),
            no_of_people: 3,
            message: Some("Looking for bridal sets".to_string()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[rstest]
    #[case::short_name(|r: &mut CreateEnquiryRequest| r.name = "P".to_string())]
    #[case::short_phone(|r: &mut CreateEnquiryRequest| r.phone_number = "12345".to_string())]
    #[case::bad_email(|r: &mut CreateEnquiryRequest| r.email = "not-an-email".to_string())]
    #[case::short_subject(|r: &mut CreateEnquiryRequest| r.subject = "x".to_string())]
    #[case::short_store(|r: &mut CreateEnquiryRequest| r.preferred_store = "Shop".to_string())]
    #[case::short_slot(|r: &mut CreateEnquiryRequest| r.preferred_date_time = "tomorrow".to_string())]
    #[case::zero_people(|r: &mut CreateEnquiryRequest| r.no_of_people = 0)]
    fn test_invalid_request_is_rejected(#[case] mutate: fn(&mut CreateEnquiryRequest)) {
        let mut request = valid_request();
        mutate(&mut request);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_party_size_defaults_to_one() {
        let request: CreateEnquiryRequest = serde_json::from_value(json!({
            "name": "Priya Sharma",
            "phone_number": "+919876543210",
            "email": "priya@example.com",
            "subject": "Wedding collection",
            "preferred_store": "Anand Jewels - Main Branch",
            "preferred_date_time": "2025-02-14 11:00"
        }))
        .unwrap();

        assert_eq!(request.no_of_people, 1);
        assert!(request.message.is_none());
        assert!(request.validate().is_ok());
    }
}
