//! Inbound event consumers

mod moderation;

pub use moderation::{parse_moderation, ModerationDecision, ModerationEventHandler};
