//! Database seeder for Aurum development and testing.
//!
//! Seeds the bootstrap admin accounts plus sample gold rates, stores,
//! and guides for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use chrono_tz::Tz;

use aurum_db::seed::{seed_admin_users, seed_sample_data};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The seed helpers report progress through tracing
    tracing_subscriber::fmt::init();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = aurum_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin users...");
    if let Err(e) = seed_admin_users(&db).await {
        eprintln!("Failed to seed admin users: {e}");
    }

    // Sample release timestamps are generated in the display timezone,
    // matching how an admin would enter them
    let timezone: Tz = std::env::var("AURUM__RATES__TIMEZONE")
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(chrono_tz::Asia::Kolkata);
    let now = Utc::now().with_timezone(&timezone).naive_local();

    println!("Seeding sample data...");
    if let Err(e) = seed_sample_data(&db, now).await {
        eprintln!("Failed to seed sample data: {e}");
    }

    println!("Seeding complete!");
}
