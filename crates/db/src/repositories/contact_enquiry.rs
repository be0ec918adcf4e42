//! Contact enquiry repository.
//!
//! Enquiries are filed by visitors against a store from the branch
//! directory. The preferred store is validated by name at create time
//! so the admin list never shows an enquiry for a branch that does not
//! exist.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{contact_enquiries, stores};

/// Error types for contact enquiry operations.
#[derive(Debug, thiserror::Error)]
pub enum EnquiryError {
    /// The preferred store does not match any branch.
    #[error("Invalid store name. Available stores: {}", .available.join(", "))]
    UnknownStore {
        /// Every valid store name, for the error message.
        available: Vec<String>,
    },

    /// Enquiry not found.
    #[error("Contact enquiry not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for filing a contact enquiry.
#[derive(Debug, Clone)]
pub struct CreateEnquiryInput {
    /// Visitor name.
    pub name: String,
    /// Callback number.
    pub phone_number: String,
    /// Contact email.
    pub email: String,
    /// What the visit is about.
    pub subject: String,
    /// Must match an existing store name exactly.
    pub preferred_store: String,
    /// Requested visit slot, free text.
    pub preferred_date_time: String,
    /// Party size.
    pub no_of_people: i32,
    /// Optional free-text message.
    pub message: Option<String>,
}

/// Contact enquiry repository.
#[derive(Debug, Clone)]
pub struct ContactEnquiryRepository {
    db: DatabaseConnection,
}

impl ContactEnquiryRepository {
    /// Creates a new contact enquiry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new enquiry after checking the preferred store exists.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStore` with the full list of valid names when the
    /// preferred store matches no branch.
    pub async fn create(
        &self,
        input: CreateEnquiryInput,
    ) -> Result<contact_enquiries::Model, EnquiryError> {
        let available = self.store_names().await?;
        if !preferred_store_is_valid(&available, &input.preferred_store) {
            return Err(EnquiryError::UnknownStore { available });
        }

        let enquiry = contact_enquiries::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            phone_number: Set(input.phone_number),
            email: Set(input.email),
            subject: Set(input.subject),
            preferred_store: Set(input.preferred_store),
            preferred_date_time: Set(input.preferred_date_time),
            no_of_people: Set(input.no_of_people),
            message: Set(input.message),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(enquiry.insert(&self.db).await?)
    }

    /// Lists the most recent enquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_recent(
        &self,
        limit: u64,
    ) -> Result<Vec<contact_enquiries::Model>, EnquiryError> {
        let enquiries = contact_enquiries::Entity::find()
            .order_by_desc(contact_enquiries::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(enquiries)
    }

    /// Lists every enquiry, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<contact_enquiries::Model>, EnquiryError> {
        let enquiries = contact_enquiries::Entity::find()
            .order_by_desc(contact_enquiries::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(enquiries)
    }

    /// Finds an enquiry by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no enquiry has the id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<contact_enquiries::Model, EnquiryError> {
        contact_enquiries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(EnquiryError::NotFound)
    }

    /// Deletes an enquiry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no enquiry has the id.
    pub async fn delete(&self, id: Uuid) -> Result<(), EnquiryError> {
        let result = contact_enquiries::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(EnquiryError::NotFound);
        }
        Ok(())
    }

    /// Counts all enquiries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, EnquiryError> {
        Ok(contact_enquiries::Entity::find().count(&self.db).await?)
    }

    async fn store_names(&self) -> Result<Vec<String>, DbErr> {
        stores::Entity::find()
            .select_only()
            .column(stores::Column::StoreName)
            .order_by_asc(stores::Column::CreatedAt)
            .into_tuple::<String>()
            .all(&self.db)
            .await
    }
}

/// Checks a preferred store against the branch directory names.
#[must_use]
pub fn preferred_store_is_valid(available: &[String], preferred: &str) -> bool {
    available.iter().any(|name| name == preferred)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<String> {
        vec![
            "Anand Jewels Main Branch".to_string(),
            "Anand Jewels Koramangala".to_string(),
            "Anand Jewels Jayanagar".to_string(),
        ]
    }

    #[test]
    fn test_exact_store_name_is_accepted() {
        assert!(preferred_store_is_valid(
            &directory(),
            "Anand Jewels Koramangala"
        ));
    }

    #[test]
    fn test_unknown_and_mismatched_names_are_rejected() {
        assert!(!preferred_store_is_valid(&directory(), "Anand Jewels"));
        assert!(!preferred_store_is_valid(
            &directory(),
            "anand jewels main branch"
        ));
        assert!(!preferred_store_is_valid(&[], "Anand Jewels Main Branch"));
    }

    #[test]
    fn test_unknown_store_error_lists_every_branch() {
        let err = EnquiryError::UnknownStore {
            available: directory(),
        };

        assert_eq!(
            err.to_string(),
            "Invalid store name. Available stores: Anand Jewels Main Branch, \
             Anand Jewels Koramangala, Anand Jewels Jayanagar"
        );
    }
}
