//! # channel-service
//!
//! Business logic layer: channel aggregate operations, membership and
//! moderation operations, and the inbound moderation event handler. Each
//! successful mutation goes through the store port's atomic guarded calls
//! and mirrors the change with exactly one published domain event.

pub mod consumers;
pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use consumers::{parse_moderation, ModerationDecision, ModerationEventHandler};
pub use dto::{
    ChannelBasicInfoResponse, ChannelResponse, CreateChannelRequest, HealthResponse,
    MemberPageResponse, MemberResponse, MembershipRequest, ReadinessResponse, ThreadRequest,
    UpdateChannelRequest,
};
pub use services::{
    ChannelService, MemberService, ServiceContext, ServiceError, ServiceResult, ThreadService,
};
