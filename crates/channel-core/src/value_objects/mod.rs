//! Value objects - immutable types with identity semantics

mod channel_id;

pub use channel_id::{ChannelId, ChannelIdParseError};
