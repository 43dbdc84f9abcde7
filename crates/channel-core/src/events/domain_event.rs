//! Domain events - events emitted when channel state changes
//!
//! Every successful store mutation publishes exactly one of these to the
//! channel exchange. The routing key carries the service, version, subject
//! and action so downstream consumers can bind with topic patterns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::value_objects::ChannelId;

/// Routing key prefix for all events published by this service
const ROUTING_PREFIX: &str = "channelService.v1";

/// All domain events published by the channel service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Channel Lifecycle Events
    // =========================================================================
    ChannelCreated(ChannelCreatedEvent),
    ChannelUpdated(ChannelUpdatedEvent),
    ChannelDeleted(ChannelDeletedEvent),
    ChannelReactivated(ChannelReactivatedEvent),

    // =========================================================================
    // Membership Events
    // =========================================================================
    UserAdded(UserAddedEvent),
    UserRemoved(UserRemovedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ChannelCreated(_) => "CHANNEL_CREATED",
            Self::ChannelUpdated(_) => "CHANNEL_UPDATED",
            Self::ChannelDeleted(_) => "CHANNEL_DELETED",
            Self::ChannelReactivated(_) => "CHANNEL_REACTIVATED",
            Self::UserAdded(_) => "USER_ADDED",
            Self::UserRemoved(_) => "USER_REMOVED",
        }
    }

    /// Get the topic routing key this event is published under
    pub fn routing_key(&self) -> String {
        let suffix = match self {
            Self::ChannelCreated(_) => "channel.created",
            Self::ChannelUpdated(_) => "channel.updated",
            Self::ChannelDeleted(_) => "channel.deleted",
            Self::ChannelReactivated(_) => "channel.reactivated",
            Self::UserAdded(_) => "user.added",
            Self::UserRemoved(_) => "user.removed",
        };
        format!("{ROUTING_PREFIX}.{suffix}")
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ChannelCreated(e) => e.timestamp,
            Self::ChannelUpdated(e) => e.timestamp,
            Self::ChannelDeleted(e) => e.timestamp,
            Self::ChannelReactivated(e) => e.timestamp,
            Self::UserAdded(e) => e.timestamp,
            Self::UserRemoved(e) => e.timestamp,
        }
    }

    /// Get the channel the event concerns
    pub fn channel_id(&self) -> ChannelId {
        match self {
            Self::ChannelCreated(e) => e.channel_id,
            Self::ChannelUpdated(e) => e.channel_id,
            Self::ChannelDeleted(e) => e.channel_id,
            Self::ChannelReactivated(e) => e.channel_id,
            Self::UserAdded(e) => e.channel_id,
            Self::UserRemoved(e) => e.channel_id,
        }
    }

    /// Build the wire envelope: event type, routing key and flat payload
    pub fn envelope(&self) -> Value {
        json!({
            "event_type": self.event_type(),
            "routing_key": self.routing_key(),
            "timestamp": self.timestamp(),
            "payload": self.payload(),
        })
    }

    /// Flat JSON payload carried in the envelope body
    ///
    /// Each variant names its own timestamp key (`created_at`, `added_at`,
    /// ...) so consumers read the instant from the payload without caring
    /// about the envelope.
    pub fn payload(&self) -> Value {
        match self {
            Self::ChannelCreated(e) => json!({
                "channel_id": e.channel_id,
                "name": e.name,
                "owner_id": e.owner_id,
                "created_at": e.timestamp,
            }),
            Self::ChannelUpdated(e) => json!({
                "channel_id": e.channel_id,
                "updated_fields": e.updated_fields,
                "updated_at": e.timestamp,
            }),
            Self::ChannelDeleted(e) => json!({
                "channel_id": e.channel_id,
                "deleted_at": e.timestamp,
            }),
            Self::ChannelReactivated(e) => json!({
                "channel_id": e.channel_id,
                "reactivated_at": e.timestamp,
            }),
            Self::UserAdded(e) => json!({
                "channel_id": e.channel_id,
                "user_id": e.user_id,
                "added_at": e.timestamp,
            }),
            Self::UserRemoved(e) => json!({
                "channel_id": e.channel_id,
                "user_id": e.user_id,
                "removed_at": e.timestamp,
            }),
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelCreatedEvent {
    pub channel_id: ChannelId,
    pub name: String,
    pub owner_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelUpdatedEvent {
    pub channel_id: ChannelId,
    /// Only the fields the caller actually changed
    pub updated_fields: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDeletedEvent {
    pub channel_id: ChannelId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReactivatedEvent {
    pub channel_id: ChannelId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAddedEvent {
    pub channel_id: ChannelId,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRemovedEvent {
    pub channel_id: ChannelId,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}
