//! Channel entity <-> row mappers
//!
//! The aggregate is stored across three tables; assembly joins a channel
//! row with its member rows (in join order) and thread ids.

use channel_core::{Channel, ChannelBasicInfo, ChannelId, ChannelMember, ChannelType, ModerationStatus};

use crate::models::{BasicInfoRow, ChannelRow, MemberRow, ThreadRow};

/// Build a Channel entity from its rows
pub fn assemble_channel(row: ChannelRow, members: Vec<MemberRow>, threads: Vec<ThreadRow>) -> Channel {
    Channel {
        id: ChannelId::new(row.id),
        name: row.name,
        owner_id: row.owner_id,
        channel_type: parse_channel_type(&row.channel_type),
        is_active: row.is_active,
        users: members.into_iter().map(map_member).collect(),
        threads: threads.into_iter().map(|t| t.thread_id).collect(),
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    }
}

/// Convert a member row to the embedded member value object
pub fn map_member(row: MemberRow) -> ChannelMember {
    ChannelMember {
        user_id: row.user_id,
        joined_at: row.joined_at,
        status: parse_status(&row.status),
    }
}

/// Convert a projection row to the basic-info summary
pub fn map_basic_info(row: BasicInfoRow) -> ChannelBasicInfo {
    ChannelBasicInfo {
        id: ChannelId::new(row.id),
        name: row.name,
        owner_id: row.owner_id,
        channel_type: parse_channel_type(&row.channel_type),
        created_at: row.created_at,
        user_count: row.user_count,
    }
}

// The CHECK constraints keep these columns inside the enum's wire values;
// an unknown value would mean a schema drift, mapped to the default.
fn parse_channel_type(s: &str) -> ChannelType {
    ChannelType::parse(s).unwrap_or_default()
}

fn parse_status(s: &str) -> ModerationStatus {
    ModerationStatus::parse(s).unwrap_or_default()
}
