//! Adds the party-size and free-text message columns to contact
//! enquiries.

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
ALTER TABLE contact_enquiries
    ADD COLUMN no_of_people INTEGER NOT NULL DEFAULT 1,
    ADD COLUMN message TEXT;
";

const DROP_COLUMNS_SQL: &str = r"
ALTER TABLE contact_enquiries
    DROP COLUMN IF EXISTS message,
    DROP COLUMN IF EXISTS no_of_people;
";
