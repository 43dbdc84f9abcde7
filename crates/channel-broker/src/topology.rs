//! Broker topology declaration
//!
//! Maps the exchange/queue/dead-letter collaborator contract onto Redis
//! Streams: the exchange is a stream key, the durable queue is a consumer
//! group on it, and the dead-letter pair is a second stream with its own
//! group. Declaration is idempotent and safe to repeat at every startup.

use tracing::{debug, info};

use crate::error::{BrokerError, BrokerResult};
use crate::pool::BrokerPool;

/// Stream and group names for one logical broker client
#[derive(Debug, Clone)]
pub struct Topology {
    /// Main exchange stream entries are published to
    pub exchange: String,
    /// Consumer group on the main exchange stream
    pub queue: String,
    /// Dead-letter stream failed deliveries are routed to
    pub dead_letter_exchange: String,
    /// Consumer group on the dead-letter stream
    pub dead_letter_queue: String,
}

impl Topology {
    /// Build topology names from a client's configuration
    #[must_use]
    pub fn from_config(config: &channel_common::BrokerClientConfig) -> Self {
        Self {
            exchange: config.exchange.clone(),
            queue: config.queue.clone(),
            dead_letter_exchange: config.dead_letter_exchange.clone(),
            dead_letter_queue: config.dead_letter_queue.clone(),
        }
    }

    /// Declare the dead-letter pair and the main pair on the broker
    ///
    /// `XGROUP CREATE ... MKSTREAM` creates the stream when absent;
    /// an already-existing group (BUSYGROUP) counts as success.
    pub async fn declare(&self, pool: &BrokerPool) -> BrokerResult<()> {
        let mut conn = pool.get().await?;

        // Dead-letter pair first, mirroring the declare order the main
        // queue's dead-letter routing depends on.
        create_group(&mut conn, &self.dead_letter_exchange, &self.dead_letter_queue).await?;
        create_group(&mut conn, &self.exchange, &self.queue).await?;

        info!(
            exchange = %self.exchange,
            queue = %self.queue,
            dead_letter = %self.dead_letter_exchange,
            "Broker topology declared"
        );
        Ok(())
    }
}

async fn create_group(
    conn: &mut deadpool_redis::Connection,
    stream: &str,
    group: &str,
) -> BrokerResult<()> {
    let result = redis::cmd("XGROUP")
        .arg("CREATE")
        .arg(stream)
        .arg(group)
        .arg("$")
        .arg("MKSTREAM")
        .query_async::<()>(conn)
        .await;

    match result {
        Ok(()) => {
            debug!(stream = %stream, group = %group, "Consumer group created");
            Ok(())
        }
        // Re-declaration of an existing group is the idempotent path
        Err(e) if e.to_string().contains("BUSYGROUP") => {
            debug!(stream = %stream, group = %group, "Consumer group already exists");
            Ok(())
        }
        Err(e) => Err(BrokerError::Redis(e)),
    }
}
