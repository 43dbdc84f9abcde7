//! Member handlers
//!
//! Endpoints for channel membership.

use axum::{
    extract::{Path, State},
    Json,
};
use channel_core::ChannelId;
use channel_service::{
    ChannelBasicInfoResponse, ChannelResponse, MemberPageResponse, MemberService,
    MembershipRequest,
};

use crate::extractors::{Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

fn parse_channel_id(raw: &str) -> Result<ChannelId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid channel_id format"))
}

/// Add a member to a channel
///
/// POST /v1/members
pub async fn add_member(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MembershipRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let channel_id = parse_channel_id(&request.channel_id)?;

    let service = MemberService::new(state.service_context());
    let response = service.add(channel_id, &request.user_id).await?;
    Ok(Created(Json(response)))
}

/// Remove a member from a channel
///
/// DELETE /v1/members
pub async fn remove_member(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MembershipRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&request.channel_id)?;

    let service = MemberService::new(state.service_context());
    let response = service.remove(channel_id, &request.user_id).await?;
    Ok(Json(response))
}

/// List channels a user is a member of
///
/// GET /v1/members/{user_id}
pub async fn get_member_channels(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<ChannelBasicInfoResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.channels_by_member(&user_id).await?;
    Ok(Json(response))
}

/// List channels owned by a user
///
/// GET /v1/members/owner/{owner_id}
pub async fn get_owner_channels(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> ApiResult<Json<Vec<ChannelBasicInfoResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.channels_by_owner(&owner_id).await?;
    Ok(Json(response))
}

/// Page through a channel's members in join order
///
/// GET /v1/members/{channel_id}/ids?page=&page_size=
pub async fn get_member_page(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<MemberPageResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = MemberService::new(state.service_context());
    let response = service
        .member_page(channel_id, pagination.page, pagination.page_size)
        .await?;
    Ok(Json(response))
}
