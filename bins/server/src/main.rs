//! Aurum API server.
//!
//! Main entry point for the gold rate publishing backend.

use std::sync::Arc;

use sea_orm::SqlxPostgresConnector;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_sessions_sqlx_store::PostgresStore;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aurum_api::{AppState, create_router, middleware::create_session_layer};
use aurum_db::seed::seed_admin_users;
use aurum_shared::{AppConfig, JwtService, JwtServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aurum=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database; the sqlx pool backs both SeaORM and the
    // session store
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    let db = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
    info!("Connected to database");

    // Session table for the admin HTML surface
    let session_store = PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    // Ensure the bootstrap admin accounts exist
    if let Err(e) = seed_admin_users(&db).await {
        error!(error = %e, "Bootstrap admin seeding failed");
    }

    // Create JWT service
    let jwt_config = JwtServiceConfig {
        secret: config.jwt.secret.clone(),
        access_token_expiry_secs: i64::try_from(config.jwt.access_token_expiry_secs)
            .unwrap_or(1800),
    };
    let jwt_service = JwtService::new(jwt_config);

    // Display timezone for release timestamps
    let timezone: chrono_tz::Tz = config
        .rates
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid timezone {:?}: {e}", config.rates.timezone))?;

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        timezone,
    };

    // Create router
    let app = create_router(state, create_session_layer(&pool, &config.session));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
