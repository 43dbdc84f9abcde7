//! Domain entities

mod basic_info;
mod channel;
mod member;

pub use basic_info::ChannelBasicInfo;
pub use channel::{Channel, ChannelType};
pub use member::{ChannelMember, ModerationStatus};
