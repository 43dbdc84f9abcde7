//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output; the data-carrying
//! ones also implement `Deserialize` so integration tests can read them back.
//! Channel ids are serialized as strings.

use channel_core::entities::{ChannelType, ModerationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Channel Responses
// ============================================================================

/// Full channel representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub is_active: bool,
    pub users: Vec<MemberResponse>,
    pub threads: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// One member of a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
    pub status: ModerationStatus,
}

/// Channel summary without the member collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelBasicInfoResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub created_at: DateTime<Utc>,
    pub user_count: i64,
}

/// One page of a channel's member collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPageResponse {
    pub channel_id: String,
    pub page: u32,
    pub page_size: u32,
    pub users: Vec<MemberResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with per-dependency detail
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub broker: &'static str,
}

impl ReadinessResponse {
    pub fn ready(database_ok: bool, broker_ok: bool) -> Self {
        let up = |ok| if ok { "up" } else { "down" };
        Self {
            status: if database_ok && broker_ok {
                "ready"
            } else {
                "degraded"
            },
            database: up(database_ok),
            broker: up(broker_ok),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
