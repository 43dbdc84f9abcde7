//! Server setup and initialization
//!
//! Provides the main application builder, dependency wiring, and the
//! server runner. The store pool, broker pool, and broker topology are
//! established once here at startup and injected everywhere else.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use channel_broker::{BrokerClients, BrokerPool, BrokerPoolConfig, Consumer, StreamPublisher};
use channel_common::{AppConfig, AppError};
use channel_db::{create_pool, PgChannelStore, StoreConfig};
use channel_service::{ModerationEventHandler, ServiceContext};
use tokio::net::TcpListener;
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let store_config = StoreConfig::from(&config.database);
    let db_pool = create_pool(&store_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create broker pool and declare topology
    info!("Connecting to broker...");
    let broker_config = BrokerPoolConfig::from(&config.broker);
    let broker_pool =
        BrokerPool::new(broker_config).map_err(|e| AppError::Broker(e.to_string()))?;
    let clients = BrokerClients::from_config(&config.broker);
    clients
        .declare_all(&broker_pool)
        .await
        .map_err(|e| AppError::Broker(e.to_string()))?;
    info!("Broker topology declared");

    // Wire the service context
    let store = Arc::new(PgChannelStore::new(db_pool.clone()));
    let publisher = Arc::new(StreamPublisher::new(
        broker_pool.clone(),
        clients.channel.topology.exchange.clone(),
    ));
    let service_context = ServiceContext::new(store, publisher);

    Ok(AppState::new(service_context, db_pool, broker_pool, config))
}

/// Connect and spawn the moderation queue consumer
///
/// Connection retry exhaustion propagates here and fails startup; a later
/// failure of the running consumer task is logged.
pub async fn start_moderation_consumer(state: &AppState) -> Result<(), AppError> {
    let clients = BrokerClients::from_config(&state.config().broker);
    let consumer_name = format!("{}-{}", state.config().app.name, Uuid::new_v4());

    let consumer = Consumer::new(
        state.broker_pool().clone(),
        clients.moderation,
        consumer_name,
        state.config().broker.retry,
    );
    consumer
        .connect()
        .await
        .map_err(|e| AppError::Broker(e.to_string()))?;

    let handler = Arc::new(ModerationEventHandler::new(state.service_context().clone()));
    tokio::spawn(async move {
        if let Err(e) = consumer.run(handler).await {
            error!(error = %e, "Moderation consumer terminated");
        }
    });

    info!("Moderation consumer started");
    Ok(())
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Start the inbound moderation consumer
    start_moderation_consumer(&state).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
