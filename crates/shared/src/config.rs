//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Rate display configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    1800 // 30 minutes
}

/// Session configuration for the admin HTML surface.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in hours.
    #[serde(default = "default_session_max_age_hours")]
    pub max_age_hours: u64,
    /// Whether to mark the session cookie as Secure (HTTPS only).
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_age_hours: default_session_max_age_hours(),
            secure_cookie: false,
        }
    }
}

fn default_session_max_age_hours() -> u64 {
    24
}

/// Rate display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// IANA timezone in which release timestamps are interpreted.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("AURUM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_env() {
        temp_env::with_vars(
            [
                ("AURUM__DATABASE__URL", Some("postgres://test/aurum")),
                ("AURUM__JWT__SECRET", Some("test-secret")),
                ("AURUM__SERVER__PORT", Some("9000")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "postgres://test/aurum");
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.jwt.access_token_expiry_secs, 1800);
                assert_eq!(config.session.max_age_hours, 24);
                assert!(!config.session.secure_cookie);
                assert_eq!(config.rates.timezone, "Asia/Kolkata");
            },
        );
    }

    #[test]
    fn test_defaults_applied() {
        temp_env::with_vars(
            [
                ("AURUM__DATABASE__URL", Some("postgres://test/aurum")),
                ("AURUM__JWT__SECRET", Some("test-secret")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
            },
        );
    }
}
