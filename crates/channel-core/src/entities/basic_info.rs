//! Channel summary projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::channel::ChannelType;
use crate::value_objects::ChannelId;

/// Read-only channel summary with a computed member count.
///
/// Never persisted; computed at query time from the channel aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBasicInfo {
    pub id: ChannelId,
    pub name: String,
    pub owner_id: String,
    pub channel_type: ChannelType,
    pub created_at: DateTime<Utc>,
    /// Current size of the member collection
    pub user_count: i64,
}
