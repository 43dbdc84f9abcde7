//! Member value object - one user's participation in a channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation status of a channel member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    /// Member in good standing
    #[default]
    Normal,
    /// Member has received a moderation warning
    Warning,
    /// Member is banned
    Banned,
}

impl ModerationStatus {
    /// Get the wire representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Banned => "banned",
        }
    }

    /// Parse from the wire representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "warning" => Some(Self::Warning),
            "banned" => Some(Self::Banned),
            _ => None,
        }
    }
}

/// Channel member value object
///
/// Owned exclusively by its parent Channel; has no identity or lifecycle
/// outside the channel's member collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMember {
    /// References a user in an external system
    pub user_id: String,
    /// Set once when the member joins, never mutated
    pub joined_at: DateTime<Utc>,
    /// Mutable by moderation operations only
    pub status: ModerationStatus,
}

impl ChannelMember {
    /// Create a member joining now with normal status
    #[must_use]
    pub fn joining_now(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            joined_at: Utc::now(),
            status: ModerationStatus::Normal,
        }
    }

    /// Check if the member is banned
    #[inline]
    #[must_use]
    pub fn is_banned(&self) -> bool {
        matches!(self.status, ModerationStatus::Banned)
    }
}
