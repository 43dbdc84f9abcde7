//! Ports - interfaces the domain needs from infrastructure
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

mod publisher;
mod store;

pub use publisher::EventPublisher;
pub use store::{ChannelPatch, ChannelStore, NewChannel, StoreResult};
