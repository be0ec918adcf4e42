//! Admin HTML pages for the branch directory.
//!
//! Images and links are plain text paths; there is no upload handling.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::RequireSuperAdmin;
use aurum_db::{
    entities::stores,
    repositories::{StoreError, StoreInput, StoreRepository},
};

use super::admin_pages::{not_found_page, render};

/// Creates the store admin page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stores", get(list_stores))
        .route("/admin/stores/add", get(add_form).post(add))
        .route("/admin/stores/edit/{id}", get(edit_form).post(edit))
        .route("/admin/stores/delete/{id}", get(delete))
}

/// One store row in the list table.
struct StoreRow {
    id: Uuid,
    store_name: String,
    store_address: String,
    timings: String,
    phone_number: String,
}

#[derive(Template)]
#[template(path = "stores/list.html")]
struct StoreListTemplate {
    username: String,
    is_super_admin: bool,
    stores: Vec<StoreRow>,
}

/// Form values as entered; optional fields stay empty strings until
/// converted to the repository input.
#[derive(Debug, Clone, Default, Deserialize)]
struct StoreForm {
    store_name: String,
    store_address: String,
    store_image: String,
    timings: String,
    phone_number: String,
    map_link: String,
    youtube_link: String,
}

#[derive(Template)]
#[template(path = "stores/form.html")]
struct StoreFormTemplate {
    username: String,
    is_super_admin: bool,
    title: &'static str,
    action: String,
    form: StoreForm,
    error: Option<String>,
}

/// GET `/admin/stores` - Every store, newest first.
async fn list_stores(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
) -> Response {
    let repo = StoreRepository::new((*state.db).clone());

    let stores = match repo.list().await {
        Ok(stores) => stores.iter().map(store_row).collect(),
        Err(e) => {
            error!(error = %e, "Failed to list stores");
            Vec::new()
        }
    };

    render(&StoreListTemplate {
        username: admin.username,
        is_super_admin: true,
        stores,
    })
    .into_response()
}

/// GET `/admin/stores/add` - Empty store form.
async fn add_form(RequireSuperAdmin(admin): RequireSuperAdmin) -> Response {
    render(&StoreFormTemplate {
        username: admin.username,
        is_super_admin: true,
        title: "Add Store",
        action: "/admin/stores/add".to_string(),
        form: StoreForm::default(),
        error: None,
    })
    .into_response()
}

/// POST `/admin/stores/add` - Create a store from the form.
async fn add(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Form(form): Form<StoreForm>,
) -> Response {
    let input = match input_from_form(&form) {
        Ok(input) => input,
        Err(message) => return add_form_with_error(admin.username, form, message),
    };

    let repo = StoreRepository::new((*state.db).clone());

    match repo.create(input).await {
        Ok(store) => {
            info!(store_id = %store.id, store_name = %store.store_name, "Store created");
            Redirect::to("/admin/stores").into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create store");
            add_form_with_error(
                admin.username,
                form,
                "Something went wrong. Please try again.".to_string(),
            )
        }
    }
}

/// GET `/admin/stores/edit/{id}` - Form prefilled from a store.
async fn edit_form(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = StoreRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(store) => render(&StoreFormTemplate {
            username: admin.username,
            is_super_admin: true,
            title: "Edit Store",
            action: format!("/admin/stores/edit/{id}"),
            form: form_from_model(&store),
            error: None,
        })
        .into_response(),
        Err(e @ StoreError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to load store");
            Redirect::to("/admin/stores").into_response()
        }
    }
}

/// POST `/admin/stores/edit/{id}` - Replace a store from the form.
async fn edit(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<Uuid>,
    Form(form): Form<StoreForm>,
) -> Response {
    let input = match input_from_form(&form) {
        Ok(input) => input,
        Err(message) => return edit_form_with_error(admin.username, id, form, message),
    };

    let repo = StoreRepository::new((*state.db).clone());

    match repo.update(id, input).await {
        Ok(store) => {
            info!(store_id = %store.id, "Store updated");
            Redirect::to("/admin/stores").into_response()
        }
        Err(e @ StoreError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to update store");
            edit_form_with_error(
                admin.username,
                id,
                form,
                "Something went wrong. Please try again.".to_string(),
            )
        }
    }
}

/// GET `/admin/stores/delete/{id}` - Delete and return to the list.
async fn delete(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = StoreRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(store_id = %id, "Store deleted");
            Redirect::to("/admin/stores").into_response()
        }
        Err(e @ StoreError::NotFound) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, "Failed to delete store");
            Redirect::to("/admin/stores").into_response()
        }
    }
}

fn add_form_with_error(username: String, form: StoreForm, message: String) -> Response {
    render(&StoreFormTemplate {
        username,
        is_super_admin: true,
        title: "Add Store",
        action: "/admin/stores/add".to_string(),
        form,
        error: Some(message),
    })
    .into_response()
}

fn edit_form_with_error(username: String, id: Uuid, form: StoreForm, message: String) -> Response {
    render(&StoreFormTemplate {
        username,
        is_super_admin: true,
        title: "Edit Store",
        action: format!("/admin/stores/edit/{id}"),
        form,
        error: Some(message),
    })
    .into_response()
}

fn input_from_form(form: &StoreForm) -> Result<StoreInput, String> {
    let store_name = required(&form.store_name, "Store name")?;
    let store_address = required(&form.store_address, "Store address")?;
    let timings = required(&form.timings, "Timings")?;

    Ok(StoreInput {
        store_name,
        store_address,
        store_image: none_if_empty(&form.store_image),
        timings,
        phone_number: none_if_empty(&form.phone_number),
        map_link: none_if_empty(&form.map_link),
        youtube_link: none_if_empty(&form.youtube_link),
    })
}

fn required(value: &str, label: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn form_from_model(store: &stores::Model) -> StoreForm {
    StoreForm {
        store_name: store.store_name.clone(),
        store_address: store.store_address.clone(),
        store_image: store.store_image.clone().unwrap_or_default(),
        timings: store.timings.clone(),
        phone_number: store.phone_number.clone().unwrap_or_default(),
        map_link: store.map_link.clone().unwrap_or_default(),
        youtube_link: store.youtube_link.clone().unwrap_or_default(),
    }
}

fn store_row(store: &stores::Model) -> StoreRow {
    StoreRow {
        id: store.id,
        store_name: store.store_name.clone(),
        store_address: store.store_address.clone(),
        timings: store.timings.clone(),
        phone_number: store.phone_number.clone().unwrap_or_else(|| "-".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> StoreForm {
        StoreForm {
            store_name: "Anand Jewels - Main Branch".to_string(),
            store_address: "12 MG Road, Bengaluru".to_string(),
            store_image: String::new(),
            timings: "10:00 AM - 8:30 PM".to_string(),
            phone_number: " +91 80 2222 1111 ".to_string(),
            map_link: String::new(),
            youtube_link: String::new(),
        }
    }

    #[test]
    fn test_empty_optionals_become_none() {
        let input = input_from_form(&filled_form()).unwrap();

        assert_eq!(input.store_image, None);
        assert_eq!(input.map_link, None);
        assert_eq!(input.youtube_link, None);
        assert_eq!(input.phone_number.as_deref(), Some("+91 80 2222 1111"));
    }

    #[test]
    fn test_missing_required_field_names_the_field() {
        let mut form = filled_form();
        form.timings = "   ".to_string();

        assert_eq!(input_from_form(&form).unwrap_err(), "Timings is required");
    }
}
