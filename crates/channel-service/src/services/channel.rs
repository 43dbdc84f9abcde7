//! Channel service
//!
//! Handles channel lifecycle: creation, lookup, partial update, soft-delete
//! and reactivation. Every successful mutation publishes its paired domain
//! event after the store change has committed; a publish failure is surfaced
//! to the caller rather than rolling the mutation back.

use channel_core::events::{
    ChannelCreatedEvent, ChannelDeletedEvent, ChannelReactivatedEvent, ChannelUpdatedEvent,
};
use channel_core::traits::{ChannelPatch, NewChannel};
use channel_core::{ChannelId, DomainError, DomainEvent};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    ChannelBasicInfoResponse, ChannelResponse, CreateChannelRequest, UpdateChannelRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Largest page size accepted by list endpoints
pub const MAX_PAGE_SIZE: u32 = 100;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new channel with the owner auto-enrolled
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateChannelRequest) -> ServiceResult<ChannelResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        // The store ignores duplicates and the owner id; dedup here anyway
        // to keep the insert list small.
        let mut initial_users = request.users;
        initial_users.sort();
        initial_users.dedup();
        initial_users.retain(|u| !u.is_empty() && *u != request.owner_id);

        let channel = self
            .ctx
            .store()
            .create(NewChannel {
                name: request.name,
                owner_id: request.owner_id,
                channel_type: request.channel_type,
                initial_users,
            })
            .await?;

        info!(channel_id = %channel.id, owner_id = %channel.owner_id, "Channel created");

        self.ctx
            .publisher()
            .publish(&DomainEvent::ChannelCreated(ChannelCreatedEvent {
                channel_id: channel.id,
                name: channel.name.clone(),
                owner_id: channel.owner_id.clone(),
                timestamp: channel.created_at,
            }))
            .await?;

        Ok(ChannelResponse::from(&channel))
    }

    /// Get an active channel by id
    #[instrument(skip(self))]
    pub async fn get(&self, channel_id: ChannelId) -> ServiceResult<ChannelResponse> {
        let channel = self
            .ctx
            .store()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        Ok(ChannelResponse::from(&channel))
    }

    /// List active channels as basic info, in creation order
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u32,
        page_size: u32,
    ) -> ServiceResult<Vec<ChannelBasicInfoResponse>> {
        validate_page(page, page_size)?;

        let offset = i64::from(page - 1) * i64::from(page_size);
        let infos = self
            .ctx
            .store()
            .list_basic(offset, i64::from(page_size))
            .await?;

        Ok(infos.iter().map(ChannelBasicInfoResponse::from).collect())
    }

    /// Get basic info for one active channel
    #[instrument(skip(self))]
    pub async fn basic_info(&self, channel_id: ChannelId) -> ServiceResult<ChannelBasicInfoResponse> {
        let info = self
            .ctx
            .store()
            .basic_info(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        Ok(ChannelBasicInfoResponse::from(&info))
    }

    /// Apply a partial update to an active channel
    ///
    /// An empty patch is indistinguishable from a missing channel to the
    /// caller: both come back as not-found.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        channel_id: ChannelId,
        request: UpdateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let patch = ChannelPatch {
            name: request.name,
            owner_id: request.owner_id,
            channel_type: request.channel_type,
        };
        if patch.is_empty() {
            return Err(DomainError::ChannelNotFound(channel_id).into());
        }

        let updated_fields = patch.as_json();
        let channel = self
            .ctx
            .store()
            .update_fields(channel_id, patch)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        info!(channel_id = %channel.id, "Channel updated");

        self.ctx
            .publisher()
            .publish(&DomainEvent::ChannelUpdated(ChannelUpdatedEvent {
                channel_id: channel.id,
                updated_fields,
                timestamp: channel.updated_at,
            }))
            .await?;

        Ok(ChannelResponse::from(&channel))
    }

    /// Soft-delete an active channel
    ///
    /// Distinguishes missing from already-inactive by reading the channel
    /// without the active filter when the guarded mutation does not match.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, channel_id: ChannelId) -> ServiceResult<ChannelResponse> {
        let channel = match self.ctx.store().deactivate(channel_id).await? {
            Some(channel) => channel,
            None => return Err(self.classify_inactive_miss(channel_id).await?.into()),
        };

        info!(channel_id = %channel.id, "Channel deactivated");

        self.ctx
            .publisher()
            .publish(&DomainEvent::ChannelDeleted(ChannelDeletedEvent {
                channel_id: channel.id,
                timestamp: channel.deleted_at.unwrap_or_else(Utc::now),
            }))
            .await?;

        Ok(ChannelResponse::from(&channel))
    }

    /// Reactivate an inactive channel
    ///
    /// The `deleted_at` stamp of the prior deactivation is kept as a record.
    #[instrument(skip(self))]
    pub async fn reactivate(&self, channel_id: ChannelId) -> ServiceResult<ChannelResponse> {
        let channel = match self.ctx.store().reactivate(channel_id).await? {
            Some(channel) => channel,
            None => return Err(self.classify_active_miss(channel_id).await?.into()),
        };

        info!(channel_id = %channel.id, "Channel reactivated");

        self.ctx
            .publisher()
            .publish(&DomainEvent::ChannelReactivated(ChannelReactivatedEvent {
                channel_id: channel.id,
                timestamp: channel.updated_at,
            }))
            .await?;

        Ok(ChannelResponse::from(&channel))
    }

    /// A deactivate matched nothing: missing channel or already inactive?
    async fn classify_inactive_miss(&self, channel_id: ChannelId) -> ServiceResult<DomainError> {
        match self.ctx.store().find_by_id_any(channel_id).await? {
            Some(_) => Ok(DomainError::AlreadyInactive(channel_id)),
            None => Ok(DomainError::ChannelNotFound(channel_id)),
        }
    }

    /// A reactivate matched nothing: missing channel or already active?
    async fn classify_active_miss(&self, channel_id: ChannelId) -> ServiceResult<DomainError> {
        match self.ctx.store().find_by_id_any(channel_id).await? {
            Some(_) => Ok(DomainError::AlreadyActive(channel_id)),
            None => Ok(DomainError::ChannelNotFound(channel_id)),
        }
    }
}

/// Validate one-based page number and bounded page size
pub(crate) fn validate_page(page: u32, page_size: u32) -> ServiceResult<()> {
    if page == 0 {
        return Err(ServiceError::validation("page must be >= 1"));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ServiceError::validation(format!(
            "page_size must be 1-{MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}
