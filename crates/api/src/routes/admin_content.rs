//! Admin HTML pages for the CMS content sections.
//!
//! One set of handlers serves all nine sections; the section slug in
//! the path picks the table and the page headings. Static admin routes
//! (gold rates, stores, enquiries) win over the `{section}` capture, so
//! only real section slugs reach these handlers.

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
use aurum_core::content::ContentSection;
use aurum_core::rates::RELEASE_DATETIME_FORMAT;
use aurum_db::repositories::{ContentError, ContentInput, ContentRecord, ContentRepository};

use super::admin_pages::{not_found_page, render};

/// Creates the content section admin page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/{section}", get(list_records))
        .route("/admin/{section}/add", get(add_form).post(add))
        .route("/admin/{section}/edit/{id}", get(edit_form).post(edit))
        .route("/admin/{section}/delete/{id}", get(delete))
}

/// One record row in a section list table.
struct ContentRow {
    id: Uuid,
    title: String,
    image: String,
    created_at: String,
}

#[derive(Template)]
#[template(path = "content/list.html")]
struct ContentListTemplate {
    username: String,
    is_super_admin: bool,
    heading: &'static str,
    slug: &'static str,
    singular: &'static str,
    records: Vec<ContentRow>,
}

/// Form values as entered.
#[derive(Debug, Clone, Default, Deserialize)]
struct ContentForm {
    title: String,
    content: String,
    image: String,
}

#[derive(Template)]
#[template(path = "content/form.html")]
struct ContentFormTemplate {
    username: String,
    is_super_admin: bool,
    title: String,
    action: String,
    slug: &'static str,
    form: ContentForm,
    error: Option<String>,
}

/// GET `/admin/{section}` - Every record in a section, newest first.
async fn list_records(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(section): Path<String>,
) -> Response {
    let section = match parse_section(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    let repo = ContentRepository::new((*state.db).clone());

    let records = match repo.list(section).await {
        Ok(records) => records
            .iter()
            .map(|record| content_row(record, state.timezone))
            .collect(),
        Err(e) => {
            error!(error = %e, section = %section, "Failed to list content records");
            Vec::new()
        }
    };

    render(&ContentListTemplate {
        username: admin.username,
        is_super_admin: true,
        heading: section.heading(),
        slug: section.slug(),
        singular: section.singular(),
        records,
    })
    .into_response()
}

/// GET `/admin/{section}/add` - Empty record form.
async fn add_form(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(section): Path<String>,
) -> Response {
    let section = match parse_section(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    render(&form_template(
        admin.username,
        section,
        FormMode::Add,
        ContentForm::default(),
        None,
    ))
    .into_response()
}

/// POST `/admin/{section}/add` - Create a record from the form.
async fn add(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(section): Path<String>,
    Form(form): Form<ContentForm>,
) -> Response {
    let section = match parse_section(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    let input = match input_from_form(&form) {
        Ok(input) => input,
        Err(message) => {
            return render(&form_template(
                admin.username,
                section,
                FormMode::Add,
                form,
                Some(message),
            ))
            .into_response();
        }
    };

    let repo = ContentRepository::new((*state.db).clone());

    match repo.create(section, input).await {
        Ok(record) => {
            info!(record_id = %record.id, section = %section, "Content record created");
            Redirect::to(&format!("/admin/{}", section.slug())).into_response()
        }
        Err(e) => {
            error!(error = %e, section = %section, "Failed to create content record");
            render(&form_template(
                admin.username,
                section,
                FormMode::Add,
                form,
                Some("Something went wrong. Please try again.".to_string()),
            ))
            .into_response()
        }
    }
}

/// GET `/admin/{section}/edit/{id}` - Form prefilled from a record.
async fn edit_form(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path((section, id)): Path<(String, Uuid)>,
) -> Response {
    let section = match parse_section(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    let repo = ContentRepository::new((*state.db).clone());

    match repo.find_by_id(section, id).await {
        Ok(record) => render(&form_template(
            admin.username,
            section,
            FormMode::Edit(id),
            form_from_record(&record),
            None,
        ))
        .into_response(),
        Err(e @ ContentError::NotFound(_)) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, section = %section, "Failed to load content record");
            Redirect::to(&format!("/admin/{}", section.slug())).into_response()
        }
    }
}

/// POST `/admin/{section}/edit/{id}` - Replace a record from the form.
async fn edit(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path((section, id)): Path<(String, Uuid)>,
    Form(form): Form<ContentForm>,
) -> Response {
    let section = match parse_section(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    let input = match input_from_form(&form) {
        Ok(input) => input,
        Err(message) => {
            return render(&form_template(
                admin.username,
                section,
                FormMode::Edit(id),
                form,
                Some(message),
            ))
            .into_response();
        }
    };

    let repo = ContentRepository::new((*state.db).clone());

    match repo.update(section, id, input).await {
        Ok(record) => {
            info!(record_id = %record.id, section = %section, "Content record updated");
            Redirect::to(&format!("/admin/{}", section.slug())).into_response()
        }
        Err(e @ ContentError::NotFound(_)) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, section = %section, "Failed to update content record");
            render(&form_template(
                admin.username,
                section,
                FormMode::Edit(id),
                form,
                Some("Something went wrong. Please try again.".to_string()),
            ))
            .into_response()
        }
    }
}

/// GET `/admin/{section}/delete/{id}` - Delete and return to the list.
async fn delete(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Path((section, id)): Path<(String, Uuid)>,
) -> Response {
    let section = match parse_section(&section) {
        Ok(section) => section,
        Err(response) => return response,
    };

    let repo = ContentRepository::new((*state.db).clone());

    match repo.delete(section, id).await {
        Ok(()) => {
            info!(record_id = %id, section = %section, "Content record deleted");
            Redirect::to(&format!("/admin/{}", section.slug())).into_response()
        }
        Err(e @ ContentError::NotFound(_)) => not_found_page(&e.to_string()),
        Err(e) => {
            error!(error = %e, section = %section, "Failed to delete content record");
            Redirect::to(&format!("/admin/{}", section.slug())).into_response()
        }
    }
}

enum FormMode {
    Add,
    Edit(Uuid),
}

fn form_template(
    username: String,
    section: ContentSection,
    mode: FormMode,
    form: ContentForm,
    error: Option<String>,
) -> ContentFormTemplate {
    let (title, action) = match mode {
        FormMode::Add => (
            format!("Add {}", section.singular()),
            format!("/admin/{}/add", section.slug()),
        ),
        FormMode::Edit(id) => (
            format!("Edit {}", section.singular()),
            format!("/admin/{}/edit/{id}", section.slug()),
        ),
    };

    ContentFormTemplate {
        username,
        is_super_admin: true,
        title,
        action,
        slug: section.slug(),
        form,
        error,
    }
}

fn parse_section(slug: &str) -> Result<ContentSection, Response> {
    slug.parse().map_err(|_| not_found_page("Page not found"))
}

fn input_from_form(form: &ContentForm) -> Result<ContentInput, String> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }

    let content = form.content.trim();
    if content.is_empty() {
        return Err("Content is required".to_string());
    }

    let image = form.image.trim();

    Ok(ContentInput {
        title: title.to_string(),
        content: content.to_string(),
        image: if image.is_empty() {
            None
        } else {
            Some(image.to_string())
        },
    })
}

fn form_from_record(record: &ContentRecord) -> ContentForm {
    ContentForm {
        title: record.title.clone(),
        content: record.content.clone(),
        image: record.image.clone().unwrap_or_default(),
    }
}

fn content_row(record: &ContentRecord, tz: chrono_tz::Tz) -> ContentRow {
    ContentRow {
        id: record.id,
        title: record.title.clone(),
        image: record.image.clone().unwrap_or_else(|| "-".to_string()),
        created_at: record
            .created_at
            .with_timezone(&tz)
            .format(RELEASE_DATETIME_FORMAT)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_is_rejected() {
        let form = ContentForm {
            title: "  ".to_string(),
            content: "Body".to_string(),
            image: String::new(),
        };

        assert_eq!(input_from_form(&form).unwrap_err(), "Title is required");
    }

    #[test]
    fn test_empty_image_becomes_none() {
        let form = ContentForm {
            title: "Gold Buying Guide".to_string(),
            content: "How to read the daily rate board.".to_string(),
            image: " ".to_string(),
        };

        let input = input_from_form(&form).unwrap();
        assert_eq!(input.image, None);
        assert_eq!(input.title, "Gold Buying Guide");
    }

    #[test]
    fn test_form_mode_builds_section_scoped_actions() {
        let template = form_template(
            "admin".to_string(),
            ContentSection::Guides,
            FormMode::Add,
            ContentForm::default(),
            None,
        );

        assert_eq!(template.title, "Add Guide");
        assert_eq!(template.action, "/admin/guides/add");

        let id = Uuid::nil();
        let template = form_template(
            "admin".to_string(),
            ContentSection::Notifications,
            FormMode::Edit(id),
            ContentForm::default(),
            None,
        );

        assert_eq!(template.title, "Edit Notification");
        assert_eq!(
            template.action,
            format!("/admin/notifications/edit/{id}")
        );
    }
}
