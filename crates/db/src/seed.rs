//! Bootstrap and sample data seeding.
//!
//! `seed_admin_users` runs at every server start and guarantees the two
//! bootstrap accounts exist. `seed_sample_data` is only invoked by the
//! seeder binary and fills an empty database with a month of rate
//! history, the branch directory, and a few guides.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;

use aurum_core::auth::{self, PasswordError};
use aurum_core::content::ContentSection;
use aurum_core::rates::{RateSheet, RateTriple};

use crate::entities::sea_orm_active_enums::AdminRole;
use crate::repositories::{
    AdminUserRepository, ContentError, ContentInput, ContentRepository, CreateGoldRateInput,
    GoldRateError, GoldRateRepository, StoreError, StoreInput, StoreRepository,
};

/// Error types for seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Gold rate seeding failed.
    #[error(transparent)]
    GoldRate(#[from] GoldRateError),

    /// Store seeding failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Content seeding failed.
    #[error(transparent)]
    Content(#[from] ContentError),
}

const BOOTSTRAP_ADMINS: [(&str, &str, AdminRole); 2] = [
    ("admin", "admin123", AdminRole::SuperAdmin),
    ("contact_manager", "contact123", AdminRole::ContactManager),
];

/// Ensures the bootstrap admin accounts exist.
///
/// Existing accounts are left untouched, so password changes made
/// through the database survive restarts.
///
/// # Errors
///
/// Returns an error if hashing or a database operation fails.
pub async fn seed_admin_users(db: &DatabaseConnection) -> Result<(), SeedError> {
    let repo = AdminUserRepository::new(db.clone());

    for (username, password, role) in BOOTSTRAP_ADMINS {
        if repo.username_exists(username).await? {
            continue;
        }

        let password_hash = auth::hash_password(password)?;
        repo.create(username, &password_hash, role).await?;
        info!(
            username = %username,
            role = %auth::AdminRole::from(role),
            "created bootstrap admin account"
        );
    }

    Ok(())
}

/// Fills an empty database with sample data for local development.
///
/// Each table is only touched when it is empty, so re-running the
/// seeder never duplicates rows.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub async fn seed_sample_data(db: &DatabaseConnection, now: NaiveDateTime) -> Result<(), SeedError> {
    seed_sample_rates(db, now).await?;
    seed_sample_stores(db).await?;
    seed_sample_guides(db).await?;
    Ok(())
}

async fn seed_sample_rates(db: &DatabaseConnection, now: NaiveDateTime) -> Result<(), SeedError> {
    let repo = GoldRateRepository::new(db.clone());

    if repo.count().await? > 0 {
        info!("gold rates already present, skipping sample rates");
        return Ok(());
    }

    let mut created = 0u32;
    for days_ago in (1..=30_i64).rev() {
        let day_index = 30 - days_ago;
        let release_time = sample_release_time(day_index);
        let release_datetime = (now.date() - Duration::days(days_ago)).and_time(release_time);

        repo.create(CreateGoldRateInput {
            release_datetime,
            sheet: sample_sheet(day_index),
        })
        .await?;
        created += 1;
    }

    info!(count = created, "seeded sample gold rate history");
    Ok(())
}

/// Business-hours release slots on quarter-hour boundaries.
fn sample_release_time(day_index: i64) -> NaiveTime {
    let hour = 9 + u32::try_from(day_index % 9).unwrap_or(0);
    let minute = u32::try_from(day_index % 4).unwrap_or(0) * 15;
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Realistic figures that drift gently across the month.
fn sample_sheet(day_index: i64) -> RateSheet {
    let factor = Decimal::ONE + Decimal::new(day_index * 2 - 30, 3);
    let making_shift = Decimal::from((day_index % 7) * 10 - 30);

    let triple = |selling: i64, exchange: i64, making: i64| RateTriple {
        selling: (Decimal::from(selling) * factor).round_dp(2),
        exchange: (Decimal::from(exchange) * factor).round_dp(2),
        making: Decimal::from(making) + making_shift,
    };

    RateSheet {
        k24: triple(7200, 6800, 800),
        k22: triple(6600, 6200, 600),
        k18: triple(5400, 5000, 400),
    }
}

async fn seed_sample_stores(db: &DatabaseConnection) -> Result<(), SeedError> {
    let repo = StoreRepository::new(db.clone());

    if !repo.list().await?.is_empty() {
        info!("stores already present, skipping sample stores");
        return Ok(());
    }

    let stores = [
        StoreInput {
            store_name: "Anand Jewels Main Branch".to_string(),
            store_address: "123 MG Road, Commercial Street, Bangalore - 560001".to_string(),
            store_image: Some("main_store.jpg".to_string()),
            timings: "Monday to Saturday: 10:00 AM - 8:00 PM, Sunday: 11:00 AM - 6:00 PM"
                .to_string(),
            phone_number: Some("+91 80 2558 1234".to_string()),
            map_link: None,
            youtube_link: None,
        },
        StoreInput {
            store_name: "Anand Jewels Koramangala".to_string(),
            store_address: "456 Koramangala 4th Block, Bangalore - 560034".to_string(),
            store_image: Some("koramangala_store.jpg".to_string()),
            timings: "Monday to Saturday: 10:30 AM - 8:30 PM, Sunday: 11:00 AM - 7:00 PM"
                .to_string(),
            phone_number: Some("+91 80 4112 5678".to_string()),
            map_link: None,
            youtube_link: None,
        },
        StoreInput {
            store_name: "Anand Jewels Jayanagar".to_string(),
            store_address: "789 Jayanagar 9th Block, Bangalore - 560069".to_string(),
            store_image: Some("jayanagar_store.jpg".to_string()),
            timings: "Monday to Saturday: 10:00 AM - 8:00 PM, Sunday: Closed".to_string(),
            phone_number: None,
            map_link: None,
            youtube_link: None,
        },
    ];

    let count = stores.len();
    for store in stores {
        repo.create(store).await?;
    }

    info!(count, "seeded sample stores");
    Ok(())
}

async fn seed_sample_guides(db: &DatabaseConnection) -> Result<(), SeedError> {
    let repo = ContentRepository::new(db.clone());

    if !repo.list(ContentSection::Guides).await?.is_empty() {
        info!("guides already present, skipping sample guides");
        return Ok(());
    }

    let guides = [
        ContentInput {
            title: "Understanding Gold Purity".to_string(),
            content: "24K is pure gold, 22K carries a small alloy for durability, and 18K \
                      suits studded jewellery. The daily board lists all three."
                .to_string(),
            image: Some("guides/purity.jpg".to_string()),
        },
        ContentInput {
            title: "How Exchange Rates Work".to_string(),
            content: "When you trade in old jewellery we weigh it, deduct impurities, and \
                      apply the exchange rate published for the day."
                .to_string(),
            image: None,
        },
        ContentInput {
            title: "Making Charges Explained".to_string(),
            content: "Making charges cover the craftsmanship of a piece and are quoted per \
                      gram alongside the selling rate."
                .to_string(),
            image: None,
        },
        ContentInput {
            title: "Reading the Hallmark".to_string(),
            content: "Every certified piece carries a BIS hallmark with the purity grade \
                      stamped next to the jeweller's mark."
                .to_string(),
            image: Some("guides/hallmark.jpg".to_string()),
        },
    ];

    let count = guides.len();
    for guide in guides {
        repo.create(ContentSection::Guides, guide).await?;
    }

    info!(count, "seeded sample guides");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sample_sheets_stay_near_the_base_rates() {
        for day_index in 0..30 {
            let sheet = sample_sheet(day_index);

            assert!(sheet.k24.selling >= dec!(6984.00) && sheet.k24.selling <= dec!(7416.00));
            assert!(sheet.k22.selling >= dec!(6402.00) && sheet.k22.selling <= dec!(6798.00));
            assert!(sheet.k18.selling >= dec!(5238.00) && sheet.k18.selling <= dec!(5562.00));
            assert!(sheet.k24.making >= dec!(770) && sheet.k24.making <= dec!(830));
        }
    }

    #[test]
    fn test_sample_release_times_fall_in_business_hours() {
        for day_index in 0..30 {
            let time = sample_release_time(day_index);
            assert!(time.hour() >= 9 && time.hour() <= 17);
            assert_eq!(time.minute() % 15, 0);
        }
    }
}
