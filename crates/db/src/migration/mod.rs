//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20250801_000001_initial;
mod m20250805_000002_store_links;
mod m20250812_000003_enquiry_details;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_initial::Migration),
            Box::new(m20250805_000002_store_links::Migration),
            Box::new(m20250812_000003_enquiry_details::Migration),
        ]
    }
}
