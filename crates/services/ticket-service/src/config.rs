//! Ticket service configuration.

use std::env;
use std::time::Duration;

use common::{DatabaseConfig, GrpcClientConfig};

/// Ticket service configuration.
#[derive(Debug, Clone)]
pub struct TicketServiceConfig {
    /// Database connection and pool settings
    pub database: DatabaseConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Upper bound for a single call, on top of any client deadline
    pub request_timeout_secs: u64,
}

impl TicketServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// A full URL in `TICKET_SERVICE_DATABASE_URL` or `DATABASE_URL` wins over
    /// the individual `DB_*` parts.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();
        let url = env::var("TICKET_SERVICE_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| database_url_from_parts(&env_or));

        Self {
            database: DatabaseConfig {
                url,
                max_connections: parse_env("DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: parse_env("DB_MIN_CONNECTIONS", defaults.min_connections),
                connect_timeout_secs: parse_env(
                    "DB_CONNECT_TIMEOUT_SECS",
                    defaults.connect_timeout_secs,
                ),
                idle_timeout_secs: parse_env("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs),
                max_lifetime_secs: parse_env("DB_MAX_LIFETIME_SECS", defaults.max_lifetime_secs),
            },
            host: env::var("GRPC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("GRPC_PORT", 50051),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TicketServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 50051,
            request_timeout_secs: 30,
        }
    }
}

/// Client-side settings for the `demo` command.
pub fn client_config_from_env() -> GrpcClientConfig {
    let defaults = GrpcClientConfig::default();
    GrpcClientConfig {
        endpoint: env::var("TICKET_SERVICE_ENDPOINT").unwrap_or(defaults.endpoint),
        connect_timeout_ms: parse_env("TICKET_CLIENT_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
        request_timeout_ms: parse_env("TICKET_CLIENT_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
    }
}

/// Assemble a Postgres URL from `DB_HOST`, `DB_PORT`, `DB_USER`,
/// `DB_PASSWORD`, `DB_NAME` and `DB_SSLMODE`.
fn database_url_from_parts(lookup: &dyn Fn(&str, &str) -> String) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        lookup("DB_USER", "postgres"),
        lookup("DB_PASSWORD", "postgres"),
        lookup("DB_HOST", "localhost"),
        lookup("DB_PORT", "5432"),
        lookup("DB_NAME", "ticketdb"),
        lookup("DB_SSLMODE", "disable"),
    )
}

/// Empty values count as unset.
fn env_or(key: &str, fallback: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}
