//! Thread service
//!
//! Handles the exclusive association between external threads and channels.
//! A thread belongs to at most one channel globally; attach and detach are
//! single guarded mutations in the store.

use channel_core::{ChannelId, DomainError};
use tracing::{info, instrument};

use crate::dto::ChannelResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Thread service
pub struct ThreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ThreadService<'a> {
    /// Create a new ThreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Attach an unattached thread to an active channel
    ///
    /// A failed predicate is disambiguated with a follow-up read: a missing
    /// or inactive channel is not-found, otherwise the thread is already
    /// attached somewhere and it is a conflict.
    #[instrument(skip(self))]
    pub async fn attach(
        &self,
        channel_id: ChannelId,
        thread_id: &str,
    ) -> ServiceResult<ChannelResponse> {
        let channel = match self.ctx.store().add_thread(channel_id, thread_id).await? {
            Some(channel) => channel,
            None => match self.ctx.store().find_by_id(channel_id).await? {
                Some(_) => {
                    return Err(DomainError::ThreadAlreadyAttached(thread_id.to_string()).into())
                }
                None => return Err(DomainError::ChannelNotFound(channel_id).into()),
            },
        };

        info!(channel_id = %channel.id, thread_id, "Thread attached");

        Ok(ChannelResponse::from(&channel))
    }

    /// Detach a thread from the active channel it is attached to
    #[instrument(skip(self))]
    pub async fn detach(
        &self,
        channel_id: ChannelId,
        thread_id: &str,
    ) -> ServiceResult<ChannelResponse> {
        let channel = self
            .ctx
            .store()
            .remove_thread(channel_id, thread_id)
            .await?
            .ok_or_else(|| DomainError::ThreadDetachRejected {
                channel_id,
                thread_id: thread_id.to_string(),
            })?;

        info!(channel_id = %channel.id, thread_id, "Thread detached");

        Ok(ChannelResponse::from(&channel))
    }

    /// Find the active channel a thread is attached to
    #[instrument(skip(self))]
    pub async fn get_by_thread(&self, thread_id: &str) -> ServiceResult<ChannelResponse> {
        let channel = self
            .ctx
            .store()
            .find_by_thread(thread_id)
            .await?
            .ok_or_else(|| DomainError::ThreadUnassigned(thread_id.to_string()))?;

        Ok(ChannelResponse::from(&channel))
    }

    /// The thread ids attached to an active channel
    #[instrument(skip(self))]
    pub async fn threads_of(&self, channel_id: ChannelId) -> ServiceResult<Vec<String>> {
        let channel = self
            .ctx
            .store()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        Ok(channel.threads)
    }
}
