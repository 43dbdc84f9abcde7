//! Typed registry of logical broker clients
//!
//! One named field per logical client, resolved from configuration at
//! startup and injected where needed. A missing client is a compile
//! error, not a runtime lookup failure.

use channel_common::BrokerConfig;

use crate::error::BrokerResult;
use crate::pool::BrokerPool;
use crate::topology::Topology;

/// One logical broker client: a topology plus its binding pattern
#[derive(Debug, Clone)]
pub struct BrokerClient {
    pub topology: Topology,
    /// Topic pattern deliveries must match to be dispatched
    pub binding_key: String,
    /// Bound in-flight message count per consumer
    pub prefetch: usize,
}

impl BrokerClient {
    fn from_config(client: &channel_common::BrokerClientConfig, prefetch: usize) -> Self {
        Self {
            topology: Topology::from_config(client),
            binding_key: client.binding_key.clone(),
            prefetch,
        }
    }
}

/// All logical clients this service talks to
///
/// `channel` carries outbound domain events; `moderation` is the inbound
/// queue of moderation decisions from other services.
#[derive(Debug, Clone)]
pub struct BrokerClients {
    pub channel: BrokerClient,
    pub moderation: BrokerClient,
}

impl BrokerClients {
    /// Resolve all clients from configuration
    #[must_use]
    pub fn from_config(config: &BrokerConfig) -> Self {
        Self {
            channel: BrokerClient::from_config(&config.channel, config.prefetch),
            moderation: BrokerClient::from_config(&config.moderation, config.prefetch),
        }
    }

    /// Declare every client's topology on the broker
    pub async fn declare_all(&self, pool: &BrokerPool) -> BrokerResult<()> {
        self.channel.topology.declare(pool).await?;
        self.moderation.topology.declare(pool).await?;
        Ok(())
    }
}
