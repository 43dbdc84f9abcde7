//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use channel_core::entities::{Channel, ChannelBasicInfo, ChannelMember};

use super::responses::{ChannelBasicInfoResponse, ChannelResponse, MemberResponse};

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            name: channel.name.clone(),
            owner_id: channel.owner_id.clone(),
            channel_type: channel.channel_type,
            is_active: channel.is_active,
            users: channel.users.iter().map(MemberResponse::from).collect(),
            threads: channel.threads.clone(),
            created_at: channel.created_at,
            updated_at: channel.updated_at,
            deleted_at: channel.deleted_at,
        }
    }
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self::from(&channel)
    }
}

impl From<&ChannelMember> for MemberResponse {
    fn from(member: &ChannelMember) -> Self {
        Self {
            user_id: member.user_id.clone(),
            joined_at: member.joined_at,
            status: member.status,
        }
    }
}

impl From<ChannelMember> for MemberResponse {
    fn from(member: ChannelMember) -> Self {
        Self::from(&member)
    }
}

impl From<&ChannelBasicInfo> for ChannelBasicInfoResponse {
    fn from(info: &ChannelBasicInfo) -> Self {
        Self {
            id: info.id.to_string(),
            name: info.name.clone(),
            owner_id: info.owner_id.clone(),
            channel_type: info.channel_type,
            created_at: info.created_at,
            user_count: info.user_count,
        }
    }
}

impl From<ChannelBasicInfo> for ChannelBasicInfoResponse {
    fn from(info: ChannelBasicInfo) -> Self {
        Self::from(&info)
    }
}
