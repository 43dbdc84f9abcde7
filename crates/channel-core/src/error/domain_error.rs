//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::ChannelId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("Thread not attached to any channel: {0}")]
    ThreadUnassigned(String),

    /// Folded negative result: the channel does not exist, is inactive,
    /// or the user is already a member. The causes are deliberately not
    /// distinguished to the caller.
    #[error("Channel {channel_id} not found or user {user_id} already a member")]
    AddMemberRejected {
        channel_id: ChannelId,
        user_id: String,
    },

    /// Folded negative result: channel missing/inactive, user not a
    /// member, or user is the protected owner.
    #[error("Channel {channel_id} not found or user {user_id} not removable")]
    RemoveMemberRejected {
        channel_id: ChannelId,
        user_id: String,
    },

    /// Folded negative result: channel missing or thread not attached here.
    #[error("Channel {channel_id} not found or thread {thread_id} not attached")]
    ThreadDetachRejected {
        channel_id: ChannelId,
        thread_id: String,
    },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Channel already inactive: {0}")]
    AlreadyInactive(ChannelId),

    #[error("Channel already active: {0}")]
    AlreadyActive(ChannelId),

    #[error("Thread already attached to a channel: {0}")]
    ThreadAlreadyAttached(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown moderation status: {0}")]
    InvalidStatus(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Broker unavailable: {0}")]
    BrokerUnavailable(String),

    /// The storage mutation committed but the paired event could not be
    /// published. Surfaced, never swallowed: the caller must learn about
    /// the detected inconsistency.
    #[error("Event delivery failed: {0}")]
    EventDelivery(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::ThreadUnassigned(_) => "UNKNOWN_THREAD",
            Self::AddMemberRejected { .. } => "MEMBER_ADD_REJECTED",
            Self::RemoveMemberRejected { .. } => "MEMBER_REMOVE_REJECTED",
            Self::ThreadDetachRejected { .. } => "THREAD_DETACH_REJECTED",
            Self::AlreadyInactive(_) => "CHANNEL_ALREADY_INACTIVE",
            Self::AlreadyActive(_) => "CHANNEL_ALREADY_ACTIVE",
            Self::ThreadAlreadyAttached(_) => "THREAD_ALREADY_ATTACHED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidStatus(_) => "INVALID_MODERATION_STATUS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::BrokerUnavailable(_) => "BROKER_UNAVAILABLE",
            Self::EventDelivery(_) => "EVENT_DELIVERY_FAILED",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ChannelNotFound(_)
                | Self::ThreadUnassigned(_)
                | Self::AddMemberRejected { .. }
                | Self::RemoveMemberRejected { .. }
                | Self::ThreadDetachRejected { .. }
        )
    }

    /// Check if this is a conflict (precondition-failed) error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyInactive(_) | Self::AlreadyActive(_) | Self::ThreadAlreadyAttached(_)
        )
    }

    /// Check if this is a validation (invalid-input) error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidStatus(_))
    }
}
