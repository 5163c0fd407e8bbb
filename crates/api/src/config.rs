use landing_core::model::DEFAULT_MAX_CARDS;
use landing_store::config::{DEFAULT_AUDIT_PATH, DEFAULT_ROWS_PATH};
use landing_store::StoreConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on cards per row applied to every mutation (default: `6`).
    pub max_cards: usize,
    /// Locations of the rows document and the audit log.
    pub store: StoreConfig,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `3000`                         |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `LANDING_MAX_CARDS`    | `6`                            |
    /// | `LANDING_ROWS_PATH`    | `data/landing-rows.json`       |
    /// | `LANDING_AUDIT_PATH`   | `data/landing-rows-audit.log`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_cards: usize = std::env::var("LANDING_MAX_CARDS")
            .unwrap_or_else(|_| DEFAULT_MAX_CARDS.to_string())
            .parse()
            .expect("LANDING_MAX_CARDS must be a valid usize");
        assert!(max_cards >= 1, "LANDING_MAX_CARDS must be at least 1");

        let store = StoreConfig::new(
            std::env::var("LANDING_ROWS_PATH").unwrap_or_else(|_| DEFAULT_ROWS_PATH.into()),
            std::env::var("LANDING_AUDIT_PATH").unwrap_or_else(|_| DEFAULT_AUDIT_PATH.into()),
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_cards,
            store,
            jwt,
        }
    }
}
