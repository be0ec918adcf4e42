//! Store repository for the branch directory.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::stores;

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store not found.
    #[error("Store not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating a store.
#[derive(Debug, Clone)]
pub struct StoreInput {
    /// Display name, also the key contact enquiries reference.
    pub store_name: String,
    /// Street address.
    pub store_address: String,
    /// Optional image path.
    pub store_image: Option<String>,
    /// Opening hours, free text.
    pub timings: String,
    /// Optional branch phone number.
    pub phone_number: Option<String>,
    /// Optional map link.
    pub map_link: Option<String>,
    /// Optional video link.
    pub youtube_link: Option<String>,
}

/// Store repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    db: DatabaseConnection,
}

impl StoreRepository {
    /// Creates a new store repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all stores, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<stores::Model>, StoreError> {
        let stores = stores::Entity::find()
            .order_by_desc(stores::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(stores)
    }

    /// Finds a store by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no store has the id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<stores::Model, StoreError> {
        stores::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Creates a new store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: StoreInput) -> Result<stores::Model, StoreError> {
        let store = stores::ActiveModel {
            id: Set(Uuid::new_v4()),
            store_name: Set(input.store_name),
            store_address: Set(input.store_address),
            store_image: Set(input.store_image),
            timings: Set(input.timings),
            phone_number: Set(input.phone_number),
            map_link: Set(input.map_link),
            youtube_link: Set(input.youtube_link),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(store.insert(&self.db).await?)
    }

    /// Replaces every editable field of an existing store.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no store has the id.
    pub async fn update(&self, id: Uuid, input: StoreInput) -> Result<stores::Model, StoreError> {
        let existing = self.find_by_id(id).await?;

        let mut active: stores::ActiveModel = existing.into();
        active.store_name = Set(input.store_name);
        active.store_address = Set(input.store_address);
        active.store_image = Set(input.store_image);
        active.timings = Set(input.timings);
        active.phone_number = Set(input.phone_number);
        active.map_link = Set(input.map_link);
        active.youtube_link = Set(input.youtube_link);

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a store.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no store has the id.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = stores::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Counts all stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(stores::Entity::find().count(&self.db).await?)
    }

    /// Lists all store names, the allowed values for an enquiry's
    /// preferred store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn names(&self) -> Result<Vec<String>, StoreError> {
        let names = stores::Entity::find()
            .select_only()
            .column(stores::Column::StoreName)
            .order_by_asc(stores::Column::CreatedAt)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(names)
    }
}
