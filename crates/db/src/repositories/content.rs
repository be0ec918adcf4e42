//! Repository for the nine CMS content tables.
//!
//! All sections share one record shape, so a single repository serves
//! them all. Section dispatch happens once, in `for_section!`, which
//! binds the right entity module for the operation body.

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use aurum_core::content::ContentSection;

/// Error types for content operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No record with the requested id in this section.
    #[error("{} not found", .0.singular())]
    NotFound(ContentSection),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A record from any content section.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContentRecord {
    /// Record id.
    pub id: Uuid,
    /// Title shown in lists.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Optional image path.
    pub image: Option<String>,
    /// When the record was created.
    pub created_at: DateTimeWithTimeZone,
}

/// Input for creating or updating a content record.
#[derive(Debug, Clone)]
pub struct ContentInput {
    /// Title shown in lists.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Optional image path.
    pub image: Option<String>,
}

/// Binds the entity module for a section and runs the operation body.
macro_rules! for_section {
    ($section:expr, $entity:ident => $body:expr) => {
        match $section {
            ContentSection::Guides => {
                use crate::entities::content::guides as $entity;
                $body
            }
            ContentSection::About => {
                use crate::entities::content::about as $entity;
                $body
            }
            ContentSection::Team => {
                use crate::entities::content::team as $entity;
                $body
            }
            ContentSection::Missions => {
                use crate::entities::content::missions as $entity;
                $body
            }
            ContentSection::Terms => {
                use crate::entities::content::terms as $entity;
                $body
            }
            ContentSection::Visions => {
                use crate::entities::content::visions as $entity;
                $body
            }
            ContentSection::Awards => {
                use crate::entities::content::awards as $entity;
                $body
            }
            ContentSection::Achievements => {
                use crate::entities::content::achievements as $entity;
                $body
            }
            ContentSection::Notifications => {
                use crate::entities::content::notifications as $entity;
                $body
            }
        }
    };
}

/// Maps any section's model into the shared record shape.
macro_rules! to_record {
    ($model:expr) => {{
        let model = $model;
        ContentRecord {
            id: model.id,
            title: model.title,
            content: model.content,
            image: model.image,
            created_at: model.created_at,
        }
    }};
}

/// Content repository shared by all nine sections.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    db: DatabaseConnection,
}

impl ContentRepository {
    /// Creates a new content repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the most recent records of a section, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_recent(
        &self,
        section: ContentSection,
        limit: u64,
    ) -> Result<Vec<ContentRecord>, ContentError> {
        for_section!(section, entity => {
            let models = entity::Entity::find()
                .order_by_desc(entity::Column::CreatedAt)
                .limit(limit)
                .all(&self.db)
                .await?;
            Ok(models.into_iter().map(|model| to_record!(model)).collect())
        })
    }

    /// Lists every record of a section, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, section: ContentSection) -> Result<Vec<ContentRecord>, ContentError> {
        for_section!(section, entity => {
            let models = entity::Entity::find()
                .order_by_desc(entity::Column::CreatedAt)
                .all(&self.db)
                .await?;
            Ok(models.into_iter().map(|model| to_record!(model)).collect())
        })
    }

    /// Finds a record by id within a section.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no record has the id.
    pub async fn find_by_id(
        &self,
        section: ContentSection,
        id: Uuid,
    ) -> Result<ContentRecord, ContentError> {
        for_section!(section, entity => {
            let model = entity::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .ok_or(ContentError::NotFound(section))?;
            Ok(to_record!(model))
        })
    }

    /// Creates a record in a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        section: ContentSection,
        input: ContentInput,
    ) -> Result<ContentRecord, ContentError> {
        for_section!(section, entity => {
            let active = entity::ActiveModel {
                id: Set(Uuid::new_v4()),
                title: Set(input.title),
                content: Set(input.content),
                image: Set(input.image),
                created_at: Set(chrono::Utc::now().into()),
            };
            let model = active.insert(&self.db).await?;
            Ok(to_record!(model))
        })
    }

    /// Replaces the editable fields of a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no record has the id.
    pub async fn update(
        &self,
        section: ContentSection,
        id: Uuid,
        input: ContentInput,
    ) -> Result<ContentRecord, ContentError> {
        for_section!(section, entity => {
            let existing = entity::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .ok_or(ContentError::NotFound(section))?;

            let mut active: entity::ActiveModel = existing.into();
            active.title = Set(input.title);
            active.content = Set(input.content);
            active.image = Set(input.image);

            let model = active.update(&self.db).await?;
            Ok(to_record!(model))
        })
    }

    /// Deletes a record from a section.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no record has the id.
    pub async fn delete(&self, section: ContentSection, id: Uuid) -> Result<(), ContentError> {
        for_section!(section, entity => {
            let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
            if result.rows_affected == 0 {
                return Err(ContentError::NotFound(section));
            }
            Ok(())
        })
    }

    /// Counts the records in a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self, section: ContentSection) -> Result<u64, ContentError> {
        for_section!(section, entity => {
            Ok(entity::Entity::find().count(&self.db).await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::content::guides;

    #[test]
    fn test_not_found_message_uses_the_section_noun() {
        assert_eq!(
            ContentError::NotFound(ContentSection::Guides).to_string(),
            "Guide not found"
        );
        assert_eq!(
            ContentError::NotFound(ContentSection::Team).to_string(),
            "Team member not found"
        );
        assert_eq!(
            ContentError::NotFound(ContentSection::Notifications).to_string(),
            "Notification not found"
        );
    }

    #[test]
    fn test_record_mapping_keeps_every_field() {
        let id = Uuid::new_v4();
        let created_at: DateTimeWithTimeZone = chrono::Utc::now().into();
        let model = guides::Model {
            id,
            title: "Gold Buying Guide".to_string(),
            content: "How to read the daily rate board.".to_string(),
            image: Some("guides/rate-board.jpg".to_string()),
            created_at,
        };

        let record = to_record!(model);

        assert_eq!(record.id, id);
        assert_eq!(record.title, "Gold Buying Guide");
        assert_eq!(record.content, "How to read the daily rate board.");
        assert_eq!(record.image.as_deref(), Some("guides/rate-board.jpg"));
        assert_eq!(record.created_at, created_at);
    }
}
