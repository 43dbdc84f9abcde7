//! Store port - the interface for channel persistence
//!
//! Every mutation that carries a precondition (channel active, user not
//! already a member, thread attached, ...) is expressed as a single
//! atomic find-and-modify: the implementation must check the predicate
//! and apply the change in one step, returning `None` when the predicate
//! does not hold. Callers never pre-read and then write.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::entities::{Channel, ChannelBasicInfo, ChannelMember, ChannelType, ModerationStatus};
use crate::error::DomainError;
use crate::value_objects::ChannelId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Parameters for creating a channel
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub name: String,
    pub owner_id: String,
    pub channel_type: ChannelType,
    /// Users granted membership at creation, in addition to the owner.
    /// Duplicates and the owner id itself are ignored.
    pub initial_users: Vec<String>,
}

/// Partial update of a channel's mutable fields
#[derive(Debug, Clone, Default)]
pub struct ChannelPatch {
    pub name: Option<String>,
    pub owner_id: Option<String>,
    pub channel_type: Option<ChannelType>,
}

impl ChannelPatch {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.owner_id.is_none() && self.channel_type.is_none()
    }

    /// JSON object containing only the fields being changed
    pub fn as_json(&self) -> Value {
        let mut fields = serde_json::Map::new();
        if let Some(name) = &self.name {
            fields.insert("name".to_string(), json!(name));
        }
        if let Some(owner_id) = &self.owner_id {
            fields.insert("owner_id".to_string(), json!(owner_id));
        }
        if let Some(channel_type) = &self.channel_type {
            fields.insert("channel_type".to_string(), json!(channel_type));
        }
        Value::Object(fields)
    }
}

/// Persistence port for channels, members and thread associations
///
/// `Option<Channel>` return values follow one convention: `Some` holds the
/// channel state after the mutation, `None` means the guarding predicate
/// failed. Only infrastructure failures surface as `Err`.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a channel with the owner enrolled as its first member
    async fn create(&self, new: NewChannel) -> StoreResult<Channel>;

    /// Find an active channel by id
    async fn find_by_id(&self, id: ChannelId) -> StoreResult<Option<Channel>>;

    /// Find a channel by id regardless of active flag
    async fn find_by_id_any(&self, id: ChannelId) -> StoreResult<Option<Channel>>;

    /// Apply a partial update to an active channel
    async fn update_fields(
        &self,
        id: ChannelId,
        patch: ChannelPatch,
    ) -> StoreResult<Option<Channel>>;

    /// Soft-delete: flip an active channel inactive and stamp deleted_at
    async fn deactivate(&self, id: ChannelId) -> StoreResult<Option<Channel>>;

    /// Flip an inactive channel back to active
    async fn reactivate(&self, id: ChannelId) -> StoreResult<Option<Channel>>;

    // =========================================================================
    // Membership
    // =========================================================================

    /// Enroll a user in an active channel they are not yet a member of
    async fn add_member(&self, id: ChannelId, user_id: &str) -> StoreResult<Option<Channel>>;

    /// Remove a non-owner member from an active channel
    async fn remove_member(&self, id: ChannelId, user_id: &str) -> StoreResult<Option<Channel>>;

    /// Set the moderation status of an existing member of an active channel
    async fn set_member_status(
        &self,
        id: ChannelId,
        user_id: &str,
        status: ModerationStatus,
    ) -> StoreResult<Option<Channel>>;

    // =========================================================================
    // Threads
    // =========================================================================

    /// Attach a globally unattached thread to an active channel
    async fn add_thread(&self, id: ChannelId, thread_id: &str) -> StoreResult<Option<Channel>>;

    /// Detach a thread from the active channel it is attached to
    async fn remove_thread(&self, id: ChannelId, thread_id: &str) -> StoreResult<Option<Channel>>;

    /// Find the active channel a thread is attached to
    async fn find_by_thread(&self, thread_id: &str) -> StoreResult<Option<Channel>>;

    // =========================================================================
    // Queries
    // =========================================================================

    /// Page of basic info for active channels, in creation order
    async fn list_basic(&self, offset: i64, limit: i64) -> StoreResult<Vec<ChannelBasicInfo>>;

    /// Basic info for one active channel
    async fn basic_info(&self, id: ChannelId) -> StoreResult<Option<ChannelBasicInfo>>;

    /// All active channels owned by a user
    async fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Channel>>;

    /// All active channels a user is a member of
    async fn list_by_member(&self, user_id: &str) -> StoreResult<Vec<Channel>>;

    /// Page of members of an active channel, `None` if the channel is missing
    async fn member_page(
        &self,
        id: ChannelId,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Option<Vec<ChannelMember>>>;
}
