//! # channel-core
//!
//! Domain layer containing entities, value objects, domain events, and the
//! store/publisher ports. This crate has zero dependencies on infrastructure
//! (database, broker, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Channel, ChannelBasicInfo, ChannelMember, ChannelType, ModerationStatus};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{ChannelPatch, ChannelStore, EventPublisher, NewChannel, StoreResult};
pub use value_objects::{ChannelId, ChannelIdParseError};
