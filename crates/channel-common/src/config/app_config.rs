//! Application configuration structs
//!
//! Loads configuration from environment variables.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub broker: BrokerConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
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
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
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

/// Message broker configuration
///
/// One logical client per exchange/queue pair the service talks to:
/// `channel` carries outbound domain events, `moderation` carries inbound
/// moderation decisions from other services.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    pub url: String,
    #[serde(default = "default_broker_max_connections")]
    pub max_connections: u32,
    pub channel: BrokerClientConfig,
    pub moderation: BrokerClientConfig,
    pub retry: ConsumerRetryConfig,
    #[serde(default = "default_prefetch")]
    pub prefetch: usize,
}

/// Topology names for one logical broker client
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerClientConfig {
    /// Main topic exchange the client publishes to / consumes from
    pub exchange: String,
    /// Durable queue bound to the exchange
    pub queue: String,
    /// Topic pattern the queue is bound with (`#` matches everything)
    #[serde(default = "default_binding_key")]
    pub binding_key: String,
    /// Dead-letter exchange failed messages are routed to
    pub dead_letter_exchange: String,
    /// Dead-letter queue bound to the dead-letter exchange
    pub dead_letter_queue: String,
}

/// Bounded-retry settings for broker connection attempts
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ConsumerRetryConfig {
    #[serde(default = "default_connect_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_connect_delay_ms")]
    pub delay_ms: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "channel-service".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_broker_max_connections() -> u32 {
    16
}

fn default_binding_key() -> String {
    "#".to_string()
}

fn default_connect_attempts() -> u32 {
    5
}

fn default_connect_delay_ms() -> u64 {
    2000
}

fn default_prefetch() -> usize {
    1
}

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            broker: BrokerConfig {
                url: env::var("BROKER_URL").map_err(|_| ConfigError::MissingVar("BROKER_URL"))?,
                max_connections: env::var("BROKER_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_broker_max_connections),
                channel: BrokerClientConfig {
                    exchange: env_or("CHANNEL_EXCHANGE", "channel.events"),
                    queue: env_or("CHANNEL_QUEUE", "channel_service_queue"),
                    binding_key: env_or("CHANNEL_BINDING_KEY", "#"),
                    dead_letter_exchange: env_or("CHANNEL_DLX", "channel_service_dlx"),
                    dead_letter_queue: env_or("CHANNEL_DLQ", "channel_service_dlq"),
                },
                moderation: BrokerClientConfig {
                    exchange: env_or("MODERATION_EXCHANGE", "moderation.events"),
                    queue: env_or("MODERATION_QUEUE", "channel_service_moderation_queue"),
                    binding_key: env_or("MODERATION_BINDING_KEY", "moderation.#"),
                    dead_letter_exchange: env_or(
                        "MODERATION_DLX",
                        "channel_service_moderation_dlx",
                    ),
                    dead_letter_queue: env_or("MODERATION_DLQ", "channel_service_moderation_dlq"),
                },
                retry: ConsumerRetryConfig {
                    max_attempts: env::var("BROKER_CONNECT_ATTEMPTS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or_else(default_connect_attempts),
                    delay_ms: env::var("BROKER_CONNECT_DELAY_MS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or_else(default_connect_delay_ms),
                },
                prefetch: env::var("BROKER_PREFETCH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_prefetch),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
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
