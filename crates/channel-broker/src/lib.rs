//! # channel-broker
//!
//! Broker layer on Redis Streams. One stream per topic exchange; a consumer
//! group per durable queue; a separate dead-letter stream per logical
//! client. Publishing appends to the exchange stream under a routing key;
//! consuming reads through the group with a bounded in-flight window and
//! routes failed deliveries to the dead-letter stream before acknowledging.

pub mod clients;
pub mod consumer;
pub mod error;
pub mod pool;
pub mod publisher;
pub mod routing;
pub mod topology;

// Re-export commonly used types
pub use clients::{BrokerClient, BrokerClients};
pub use consumer::{Consumer, Delivery, MessageHandler};
pub use error::{BrokerError, BrokerResult};
pub use pool::{BrokerPool, BrokerPoolConfig};
pub use publisher::StreamPublisher;
pub use routing::topic_matches;
pub use topology::Topology;
