//! Admin user repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{admin_users, sea_orm_active_enums::AdminRole};

/// Admin user repository for lookups and bootstrap creation.
#[derive(Debug, Clone)]
pub struct AdminUserRepository {
    db: DatabaseConnection,
}

impl AdminUserRepository {
    /// Creates a new admin user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an admin by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<admin_users::Model>, DbErr> {
        admin_users::Entity::find()
            .filter(admin_users::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds an admin by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<admin_users::Model>, DbErr> {
        admin_users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new admin user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<admin_users::Model, DbErr> {
        let admin = admin_users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role),
            created_at: Set(chrono::Utc::now().into()),
        };

        admin.insert(&self.db).await
    }

    /// Checks if a username is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = admin_users::Entity::find()
            .filter(admin_users::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
