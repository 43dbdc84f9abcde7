//! Durable event publisher
//!
//! Appends serialized envelopes to the exchange stream under their routing
//! key. Distinguishes "exchange not declared" from "no connection": a
//! committed store mutation whose event cannot be published must surface
//! the right failure class to the caller.

use async_trait::async_trait;
use tracing::debug;

use channel_core::{DomainError, DomainEvent, EventPublisher};

use crate::error::{BrokerError, BrokerResult};
use crate::pool::BrokerPool;

/// Field names of a stream entry
const FIELD_ROUTING_KEY: &str = "routing_key";
const FIELD_BODY: &str = "body";

/// Publisher over one exchange stream
#[derive(Clone)]
pub struct StreamPublisher {
    pool: BrokerPool,
    exchange: String,
}

impl StreamPublisher {
    /// Create a publisher for the named exchange stream
    pub fn new(pool: BrokerPool, exchange: impl Into<String>) -> Self {
        Self {
            pool,
            exchange: exchange.into(),
        }
    }

    /// Publish raw bytes to the exchange under a routing key
    ///
    /// Stream entries are durable by nature; there is no separate delivery
    /// mode to set. Fails with `ExchangeMissing` when the exchange stream
    /// has not been declared, and `Connection` when no broker connection
    /// is available.
    pub async fn publish_raw(&self, routing_key: &str, body: &[u8]) -> BrokerResult<()> {
        let mut conn = self.pool.get().await?;

        let exists: bool = redis::cmd("EXISTS")
            .arg(&self.exchange)
            .query_async(&mut conn)
            .await?;
        if !exists {
            return Err(BrokerError::ExchangeMissing(self.exchange.clone()));
        }

        redis::cmd("XADD")
            .arg(&self.exchange)
            .arg("*")
            .arg(FIELD_ROUTING_KEY)
            .arg(routing_key)
            .arg(FIELD_BODY)
            .arg(body)
            .query_async::<String>(&mut conn)
            .await?;

        debug!(
            exchange = %self.exchange,
            routing_key = %routing_key,
            "Event published"
        );
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for StreamPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), DomainError> {
        let body = serde_json::to_vec(&event.envelope())
            .map_err(|e| DomainError::EventDelivery(e.to_string()))?;
        self.publish_raw(&event.routing_key(), &body)
            .await
            .map_err(DomainError::from)
    }
}
