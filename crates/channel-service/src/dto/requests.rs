//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; the ones carrying user input
//! also implement `Validate`.

use channel_core::ChannelType;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Owner id must not be empty"))]
    pub owner_id: String,

    /// Channel type: public or private (defaults to public)
    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,

    /// Users to enroll at creation time (the owner is always enrolled)
    #[serde(default)]
    pub users: Vec<String>,
}

/// Update channel request
///
/// Every field is optional; omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Owner id must not be empty"))]
    pub owner_id: Option<String>,

    /// Channel type: public or private
    #[serde(rename = "type")]
    pub channel_type: Option<ChannelType>,
}

// ============================================================================
// Membership Requests
// ============================================================================

/// Add or remove a member of a channel
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MembershipRequest {
    pub channel_id: String,

    #[validate(length(min = 1, message = "User id must not be empty"))]
    pub user_id: String,
}

// ============================================================================
// Thread Requests
// ============================================================================

/// Attach or detach a thread
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ThreadRequest {
    pub channel_id: String,

    #[validate(length(min = 1, message = "Thread id must not be empty"))]
    pub thread_id: String,
}
