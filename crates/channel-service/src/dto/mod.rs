//! Request and response DTOs

mod mappers;
mod requests;
mod responses;

pub use requests::{CreateChannelRequest, MembershipRequest, ThreadRequest, UpdateChannelRequest};
pub use responses::{
    ChannelBasicInfoResponse, ChannelResponse, HealthResponse, MemberPageResponse, MemberResponse,
    ReadinessResponse,
};
