//! Initial database migration.
//!
//! Creates the admin accounts, the consolidated gold rate table, the
//! store directory, contact enquiries, and the nine content tables.

use aurum_core::content::ContentSection;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: ADMIN ACCOUNTS
        // ============================================================
        db.execute_unprepared(ADMIN_USERS_SQL).await?;

        // ============================================================
        // PART 3: GOLD RATE SNAPSHOTS
        // ============================================================
        db.execute_unprepared(GOLD_RATES_SQL).await?;

        // ============================================================
        // PART 4: STORE DIRECTORY
        // ============================================================
        db.execute_unprepared(STORES_SQL).await?;

        // ============================================================
        // PART 5: CONTACT ENQUIRIES
        // ============================================================
        db.execute_unprepared(CONTACT_ENQUIRIES_SQL).await?;

        // ============================================================
        // PART 6: CONTENT TABLES
        // ============================================================
        for section in ContentSection::ALL {
            db.execute_unprepared(&content_table_sql(section.slug()))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for section in ContentSection::ALL {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {} CASCADE;", section.slug()))
                .await?;
        }
        db.execute_unprepared(DROP_CORE_SQL).await?;

        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Admin roles
CREATE TYPE admin_role AS ENUM (
    'super_admin',
    'contact_manager'
);
";

const ADMIN_USERS_SQL: &str = r"
CREATE TABLE admin_users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    role admin_role NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const GOLD_RATES_SQL: &str = r"
CREATE TABLE gold_rates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    gold_24k_new_rate NUMERIC(12, 2) NOT NULL,
    gold_24k_exchange_rate NUMERIC(12, 2) NOT NULL,
    gold_24k_making_charges NUMERIC(12, 2) NOT NULL DEFAULT 0,
    gold_22k_new_rate NUMERIC(12, 2) NOT NULL,
    gold_22k_exchange_rate NUMERIC(12, 2) NOT NULL,
    gold_22k_making_charges NUMERIC(12, 2) NOT NULL DEFAULT 0,
    gold_18k_new_rate NUMERIC(12, 2) NOT NULL,
    gold_18k_exchange_rate NUMERIC(12, 2) NOT NULL,
    gold_18k_making_charges NUMERIC(12, 2) NOT NULL DEFAULT 0,
    release_datetime TIMESTAMP NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- One snapshot per exact release timestamp
    CONSTRAINT uq_gold_rates_release_datetime UNIQUE (release_datetime)
);

CREATE INDEX idx_gold_rates_release_datetime ON gold_rates(release_datetime DESC);
";

const STORES_SQL: &str = r"
CREATE TABLE stores (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    store_name VARCHAR(200) NOT NULL,
    store_address TEXT NOT NULL,
    store_image VARCHAR(500),
    timings VARCHAR(500) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CONTACT_ENQUIRIES_SQL: &str = r"
CREATE TABLE contact_enquiries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL,
    phone_number VARCHAR(20) NOT NULL,
    email VARCHAR(255) NOT NULL,
    subject VARCHAR(200) NOT NULL,
    preferred_store VARCHAR(200) NOT NULL,
    preferred_date_time VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_contact_enquiries_created_at ON contact_enquiries(created_at DESC);
";

/// All nine content tables share this shape.
fn content_table_sql(table: &str) -> String {
    format!(
        r"
CREATE TABLE {table} (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(255) NOT NULL,
    content TEXT NOT NULL,
    image VARCHAR(500),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"
    )
}

const DROP_CORE_SQL: &str = r"
DROP TABLE IF EXISTS contact_enquiries CASCADE;
DROP TABLE IF EXISTS stores CASCADE;
DROP TABLE IF EXISTS gold_rates CASCADE;
DROP TABLE IF EXISTS admin_users CASCADE;
DROP TYPE IF EXISTS admin_role;
";
