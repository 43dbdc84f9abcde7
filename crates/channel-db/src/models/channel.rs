//! Channel database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelRow {
    pub id: Uuid,
    pub name: String,
    pub owner_id: String,
    /// Channel type: 'public' or 'private'
    pub channel_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database row for the channel_members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub channel_id: Uuid,
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
    /// Moderation status: 'normal', 'warning' or 'banned'
    pub status: String,
}

/// Database row for the channel_threads table
#[derive(Debug, Clone, FromRow)]
pub struct ThreadRow {
    pub thread_id: String,
    pub channel_id: Uuid,
    pub attached_at: DateTime<Utc>,
}

/// Aggregated projection row: channel summary with computed member count
#[derive(Debug, Clone, FromRow)]
pub struct BasicInfoRow {
    pub id: Uuid,
    pub name: String,
    pub owner_id: String,
    pub channel_type: String,
    pub created_at: DateTime<Utc>,
    pub user_count: i64,
}
