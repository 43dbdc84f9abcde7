//! Member service
//!
//! Handles channel membership and member moderation status. The negative
//! outcomes of add/remove are folded: the caller cannot tell a missing
//! channel from an already-present (or owner-protected) member.

use channel_core::events::{UserAddedEvent, UserRemovedEvent};
use channel_core::{ChannelId, DomainError, DomainEvent, ModerationStatus};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{ChannelBasicInfoResponse, ChannelResponse, MemberPageResponse, MemberResponse};

use super::channel::validate_page;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Enroll a user in an active channel
    #[instrument(skip(self))]
    pub async fn add(&self, channel_id: ChannelId, user_id: &str) -> ServiceResult<ChannelResponse> {
        let channel = self
            .ctx
            .store()
            .add_member(channel_id, user_id)
            .await?
            .ok_or_else(|| DomainError::AddMemberRejected {
                channel_id,
                user_id: user_id.to_string(),
            })?;

        info!(channel_id = %channel.id, user_id, "Member added");

        // Stamp the event with the join time the store recorded
        let joined_at = channel
            .member(user_id)
            .map(|m| m.joined_at)
            .unwrap_or_else(Utc::now);

        self.ctx
            .publisher()
            .publish(&DomainEvent::UserAdded(UserAddedEvent {
                channel_id: channel.id,
                user_id: user_id.to_string(),
                timestamp: joined_at,
            }))
            .await?;

        Ok(ChannelResponse::from(&channel))
    }

    /// Remove a non-owner member from an active channel
    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        channel_id: ChannelId,
        user_id: &str,
    ) -> ServiceResult<ChannelResponse> {
        let channel = self
            .ctx
            .store()
            .remove_member(channel_id, user_id)
            .await?
            .ok_or_else(|| DomainError::RemoveMemberRejected {
                channel_id,
                user_id: user_id.to_string(),
            })?;

        info!(channel_id = %channel.id, user_id, "Member removed");

        self.ctx
            .publisher()
            .publish(&DomainEvent::UserRemoved(UserRemovedEvent {
                channel_id: channel.id,
                user_id: user_id.to_string(),
                timestamp: Utc::now(),
            }))
            .await?;

        Ok(ChannelResponse::from(&channel))
    }

    /// Set the moderation status of a member
    ///
    /// Driven by the moderation consumer, so a failed predicate (missing
    /// channel or membership) is logged and absorbed instead of erroring:
    /// the delivery must still be acknowledged.
    #[instrument(skip(self))]
    pub async fn set_moderation_status(
        &self,
        channel_id: ChannelId,
        user_id: &str,
        status: ModerationStatus,
    ) -> ServiceResult<()> {
        match self
            .ctx
            .store()
            .set_member_status(channel_id, user_id, status)
            .await?
        {
            Some(_) => {
                info!(channel_id = %channel_id, user_id, status = status.as_str(), "Moderation status applied");
            }
            None => {
                info!(channel_id = %channel_id, user_id, "Moderation target not found, skipping");
            }
        }
        Ok(())
    }

    /// All active channels owned by a user, as basic info
    #[instrument(skip(self))]
    pub async fn channels_by_owner(
        &self,
        owner_id: &str,
    ) -> ServiceResult<Vec<ChannelBasicInfoResponse>> {
        let channels = self.ctx.store().list_by_owner(owner_id).await?;
        Ok(channels.iter().map(summarize).collect())
    }

    /// All active channels a user is a member of, as basic info
    #[instrument(skip(self))]
    pub async fn channels_by_member(
        &self,
        user_id: &str,
    ) -> ServiceResult<Vec<ChannelBasicInfoResponse>> {
        let channels = self.ctx.store().list_by_member(user_id).await?;
        Ok(channels.iter().map(summarize).collect())
    }

    /// One page of a channel's members, in join order
    #[instrument(skip(self))]
    pub async fn member_page(
        &self,
        channel_id: ChannelId,
        page: u32,
        page_size: u32,
    ) -> ServiceResult<MemberPageResponse> {
        validate_page(page, page_size)?;

        let offset = i64::from(page - 1) * i64::from(page_size);
        let members = self
            .ctx
            .store()
            .member_page(channel_id, offset, i64::from(page_size))
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        Ok(MemberPageResponse {
            channel_id: channel_id.to_string(),
            page,
            page_size,
            users: members.iter().map(MemberResponse::from).collect(),
        })
    }
}

fn summarize(channel: &channel_core::Channel) -> ChannelBasicInfoResponse {
    ChannelBasicInfoResponse {
        id: channel.id.to_string(),
        name: channel.name.clone(),
        owner_id: channel.owner_id.clone(),
        channel_type: channel.channel_type,
        created_at: channel.created_at,
        user_count: channel.users.len() as i64,
    }
}
