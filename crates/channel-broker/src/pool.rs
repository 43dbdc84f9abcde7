//! Broker connection pool using deadpool-redis.
//!
//! The pool is constructed once at process startup and injected into the
//! publisher and consumers; no component manages connection lifecycle on
//! its own.

use deadpool_redis::{Config, Pool, Runtime};

use crate::error::{BrokerError, BrokerResult};

/// Broker pool configuration
#[derive(Debug, Clone)]
pub struct BrokerPoolConfig {
    /// Broker connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: usize,
}

impl Default for BrokerPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 16,
        }
    }
}

impl From<&channel_common::BrokerConfig> for BrokerPoolConfig {
    fn from(config: &channel_common::BrokerConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Managed broker connection pool
#[derive(Clone)]
pub struct BrokerPool {
    pool: Pool,
}

impl std::fmt::Debug for BrokerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl BrokerPool {
    /// Create a new broker pool with the given configuration
    pub fn new(config: BrokerPoolConfig) -> BrokerResult<Self> {
        let cfg = Config::from_url(&config.url);
        let pool = cfg
            .builder()
            .map_err(|e| BrokerError::CreatePool(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| BrokerError::CreatePool(e.to_string()))?;

        // Redact credentials from URL for logging
        let safe_url = config.url.split('@').next_back().unwrap_or(&config.url);
        tracing::info!(
            url = %safe_url,
            max_connections = config.max_connections,
            "Broker pool created"
        );

        Ok(Self { pool })
    }

    /// Create a new broker pool from channel-common config
    pub fn from_config(config: &channel_common::BrokerConfig) -> BrokerResult<Self> {
        Self::new(BrokerPoolConfig::from(config))
    }

    /// Get a connection from the pool
    pub async fn get(&self) -> BrokerResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(BrokerError::from)
    }

    /// Get the current pool status
    #[must_use]
    pub fn status(&self) -> deadpool_redis::Status {
        self.pool.status()
    }

    /// Check if the pool is healthy by pinging the broker
    pub async fn health_check(&self) -> BrokerResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
