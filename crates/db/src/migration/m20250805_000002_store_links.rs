//! Adds the contact and link columns the store directory grew after
//! launch: phone number, map link, and video link.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ADD_COLUMNS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_COLUMNS_SQL).await?;
        Ok(())
    }
}

const ADD_COLUMNS_SQL: &str = r"
ALTER TABLE stores
    ADD COLUMN phone_number VARCHAR(20),
    ADD COLUMN map_link TEXT,
    ADD COLUMN youtube_link VARCHAR(500);
";

const DROP_COLUMNS_SQL: &str = r"
ALTER TABLE stores
    DROP COLUMN IF EXISTS youtube_link,
    DROP COLUMN IF EXISTS map_link,
    DROP COLUMN IF EXISTS phone_number;
";
