//! Channel entity - the aggregate root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::member::ChannelMember;
use crate::value_objects::ChannelId;

/// Channel visibility type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    /// Visible to everyone
    #[default]
    Public,
    /// Invitation only
    Private,
}

impl ChannelType {
    /// Get the wire representation
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    /// Parse from the wire representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Channel aggregate root
///
/// Invariants upheld by the store layer:
/// - the owner is always present in `users` (auto-joined at creation)
/// - a member id appears at most once in `users`
/// - a thread id belongs to at most one channel globally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    /// References a user in an external system, not validated locally
    pub owner_id: String,
    pub channel_type: ChannelType,
    pub is_active: bool,
    /// Members in join order
    pub users: Vec<ChannelMember>,
    /// Thread ids associated with this channel
    pub threads: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set on deactivation; kept across reactivation as a record of the
    /// most recent deactivation
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Channel {
    /// Find a member by user id
    #[must_use]
    pub fn member(&self, user_id: &str) -> Option<&ChannelMember> {
        self.users.iter().find(|m| m.user_id == user_id)
    }

    /// Check if a user is a member
    #[inline]
    #[must_use]
    pub fn is_member(&self, user_id: &str) -> bool {
        self.member(user_id).is_some()
    }

    /// Number of members (including the owner)
    #[inline]
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.users.len()
    }

    /// Check if a thread is attached to this channel
    #[inline]
    #[must_use]
    pub fn has_thread(&self, thread_id: &str) -> bool {
        self.threads.iter().any(|t| t == thread_id)
    }

    /// Check if the user is the channel owner
    #[inline]
    #[must_use]
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}
