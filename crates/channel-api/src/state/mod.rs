//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the concrete pools (kept for readiness checks), and configuration.

use std::sync::Arc;

use channel_broker::BrokerPool;
use channel_common::AppConfig;
use channel_db::PgPool;
use channel_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing the store and publisher ports
    service_context: Arc<ServiceContext>,
    /// Database pool, used directly only by the readiness probe
    db_pool: PgPool,
    /// Broker pool, used directly only by the readiness probe
    broker_pool: BrokerPool,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        db_pool: PgPool,
        broker_pool: BrokerPool,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            db_pool,
            broker_pool,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the database pool
    pub fn db_pool(&self) -> &PgPool {
        &self.db_pool
    }

    /// Get the broker pool
    pub fn broker_pool(&self) -> &BrokerPool {
        &self.broker_pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
