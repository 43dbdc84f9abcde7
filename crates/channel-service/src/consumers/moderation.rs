//! Moderation event handler
//!
//! Processes inbound moderation events and applies the resulting member
//! status changes. Tolerance rules: an unknown event type or a payload
//! missing its ids is a forward-compatible no-op (logged and acknowledged);
//! only a payload that cannot be decoded at all, or a store failure while
//! applying the change, is an error for the delivery pipeline.

use async_trait::async_trait;
use channel_core::{ChannelId, ModerationStatus};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use channel_broker::{Delivery, MessageHandler};

use crate::services::{MemberService, ServiceContext};

/// Wire shape of an inbound moderation event
#[derive(Debug, Deserialize)]
struct ModerationMessage {
    event_type: String,
    #[serde(default)]
    data: ModerationData,
}

#[derive(Debug, Default, Deserialize)]
struct ModerationData {
    user_id: Option<String>,
    channel_id: Option<String>,
}

/// Outcome of interpreting a moderation message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationDecision {
    /// Apply a status change to one member
    Apply {
        channel_id: ChannelId,
        user_id: String,
        status: ModerationStatus,
    },
    /// Acknowledge without mutation; the reason is logged by the caller
    Ignore(&'static str),
}

/// Interpret a moderation message body
///
/// An `Err` means the body is not valid JSON for the envelope at all; that
/// is a transport-level failure and the delivery should be dead-lettered.
pub fn parse_moderation(body: &[u8]) -> Result<ModerationDecision, serde_json::Error> {
    let message: ModerationMessage = serde_json::from_slice(body)?;

    let status = match message.event_type.as_str() {
        "moderation.warning" => ModerationStatus::Warning,
        "moderation.user_banned" => ModerationStatus::Banned,
        "moderation.user_unbanned" => ModerationStatus::Normal,
        _ => return Ok(ModerationDecision::Ignore("unknown event type")),
    };

    let Some(user_id) = message.data.user_id.filter(|u| !u.is_empty()) else {
        return Ok(ModerationDecision::Ignore("missing user_id"));
    };
    let Some(raw_channel_id) = message.data.channel_id else {
        return Ok(ModerationDecision::Ignore("missing channel_id"));
    };
    let Ok(channel_id) = ChannelId::parse(&raw_channel_id) else {
        return Ok(ModerationDecision::Ignore("unparseable channel_id"));
    };

    Ok(ModerationDecision::Apply {
        channel_id,
        user_id,
        status,
    })
}

/// Handler wired to the moderation queue consumer
pub struct ModerationEventHandler {
    ctx: ServiceContext,
}

impl ModerationEventHandler {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MessageHandler for ModerationEventHandler {
    #[instrument(skip(self, delivery), fields(delivery_id = %delivery.id, routing_key = %delivery.routing_key))]
    async fn handle(&self, delivery: &Delivery) -> anyhow::Result<()> {
        match parse_moderation(&delivery.body)? {
            ModerationDecision::Apply {
                channel_id,
                user_id,
                status,
            } => {
                info!(channel_id = %channel_id, user_id, status = status.as_str(), "Applying moderation event");
                MemberService::new(&self.ctx)
                    .set_moderation_status(channel_id, &user_id, status)
                    .await?;
                Ok(())
            }
            ModerationDecision::Ignore(reason) => {
                warn!(reason, "Ignoring moderation event");
                Ok(())
            }
        }
    }
}
