//! Server configuration.

use std::env;

use auth::DEFAULT_JWT_EXPIRATION_HOURS;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Longest accepted token lifetime: one year.
pub const MAX_JWT_EXPIRATION_HOURS: u64 = 24 * 365;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// JWT secret. A random one is generated when unset.
    pub jwt_secret: Option<String>,
    /// JWT expiration in hours.
    pub jwt_expiration_hours: u64,
    /// Log level.
    pub log_level: String,
    /// Delay added to every request, in milliseconds.
    pub simulated_latency_ms: u64,
    /// Whether to load the demo users, rooms and history on startup.
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: None,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            log_level: "info".to_string(),
            simulated_latency_ms: 0,
            seed_demo_data: true,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Loads configuration through a variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match var("ROLLCALL_SERVER_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("ROLLCALL_SERVER_PORT is not a valid port: {port}"))?,
            None => defaults.port,
        };

        let jwt_expiration_hours = match var("ROLLCALL_JWT_EXPIRATION_HOURS") {
            Some(hours) => hours
                .trim()
                .parse()
                .ok()
                .filter(|h| (1..=MAX_JWT_EXPIRATION_HOURS).contains(h))
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "ROLLCALL_JWT_EXPIRATION_HOURS must be between 1 and {MAX_JWT_EXPIRATION_HOURS}: {hours}"
                    )
                })?,
            None => defaults.jwt_expiration_hours,
        };

        let jwt_secret = var("ROLLCALL_JWT_SECRET").filter(|s| !s.trim().is_empty());

        Ok(Self {
            host: var("ROLLCALL_SERVER_HOST").unwrap_or(defaults.host),
            port,
            jwt_secret,
            jwt_expiration_hours,
            log_level: var("ROLLCALL_LOG_LEVEL").unwrap_or(defaults.log_level),
            simulated_latency_ms: var("ROLLCALL_SIMULATED_LATENCY_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.simulated_latency_ms),
            seed_demo_data: var("ROLLCALL_SEED_DEMO_DATA")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.seed_demo_data),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
