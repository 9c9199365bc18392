//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use presence_core::PresenceStatus;
use serde::Deserialize;
use std::env;

/// URL scheme that selects the in-process user store instead of Postgres
pub const MEMORY_DATABASE_URL: &str = "memory://";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    /// Absent when `REDIS_URL` is unset; sessions and events then stay in-process
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub presence: PresenceConfig,
    pub id: IdConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// `memory://` keeps users in process memory (tests, demos)
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_DATABASE_URL)
    }
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Presence behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    /// Status given to newly created users
    #[serde(default)]
    pub default_status: PresenceStatus,
    /// Publish `PRESENCE_UPDATE` events to observers after each toggle
    #[serde(default = "default_broadcast")]
    pub broadcast: bool,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            default_status: PresenceStatus::default(),
            broadcast: default_broadcast(),
        }
    }
}

/// User id generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "presence-board".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604800 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_broadcast() -> bool {
    true
}

const MAX_WORKER_ID: u16 = 1023;

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue(key, raw))
                })
                .transpose()
        };

        let port = match parsed("API_PORT")? {
            Some(port) => u16::try_from(port)
                .map_err(|_| ConfigError::InvalidValue("API_PORT", port.to_string()))?,
            None => default_port(),
        };

        let worker_id = match parsed("WORKER_ID")? {
            Some(id) if id <= u64::from(MAX_WORKER_ID) => id as u16,
            Some(id) => return Err(ConfigError::InvalidValue("WORKER_ID", id.to_string())),
            None => 0,
        };

        let default_status = match lookup("PRESENCE_DEFAULT_STATUS") {
            Some(raw) => raw
                .parse::<PresenceStatus>()
                .map_err(|_| ConfigError::InvalidValue("PRESENCE_DEFAULT_STATUS", raw))?,
            None => PresenceStatus::default(),
        };

        let broadcast = match lookup("PRESENCE_BROADCAST") {
            Some(raw) => parse_bool(&raw)
                .ok_or(ConfigError::InvalidValue("PRESENCE_BROADCAST", raw))?,
            None => default_broadcast(),
        };

        let redis = lookup("REDIS_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| -> Result<RedisConfig, ConfigError> {
                Ok(RedisConfig {
                    url,
                    max_connections: parsed("REDIS_MAX_CONNECTIONS")?
                        .map_or_else(default_redis_max_connections, |v| v as u32),
                })
            })
            .transpose()?;

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                    .map_or_else(default_max_connections, |v| v as u32),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                    .map_or_else(default_min_connections, |v| v as u32),
            },
            redis,
            jwt: JwtConfig {
                secret: lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parsed("JWT_ACCESS_TOKEN_EXPIRY")?
                    .map_or_else(default_access_token_expiry, |v| v as i64),
                refresh_token_expiry: parsed("JWT_REFRESH_TOKEN_EXPIRY")?
                    .map_or_else(default_refresh_token_expiry, |v| v as i64),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .map_or_else(default_requests_per_second, |v| v as u32),
                burst: parsed("RATE_LIMIT_BURST")?.map_or_else(default_burst, |v| v as u32),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            presence: PresenceConfig {
                default_status,
                broadcast,
            },
            id: IdConfig { worker_id },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
