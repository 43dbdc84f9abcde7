//! Channel handlers
//!
//! Endpoints for channel lifecycle management.

use axum::{
    extract::{Path, State},
    Json,
};
use channel_core::ChannelId;
use channel_service::{
    ChannelBasicInfoResponse, ChannelResponse, ChannelService, CreateChannelRequest,
    UpdateChannelRequest,
};

use crate::extractors::{Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

fn parse_channel_id(raw: &str) -> Result<ChannelId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid channel_id format"))
}

/// Create channel
///
/// POST /v1/channels
pub async fn create_channel(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service.create(request).await?;
    Ok(Created(Json(response)))
}

/// List channels as basic info, in creation order
///
/// GET /v1/channels?page=&page_size=
pub async fn list_channels(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ChannelBasicInfoResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service.list(pagination.page, pagination.page_size).await?;
    Ok(Json(response))
}

/// Get channel by ID
///
/// GET /v1/channels/{channel_id}
pub async fn get_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.get(channel_id).await?;
    Ok(Json(response))
}

/// Update channel fields
///
/// PUT /v1/channels/{channel_id}
pub async fn update_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.update(channel_id, request).await?;
    Ok(Json(response))
}

/// Soft-delete channel
///
/// DELETE /v1/channels/{channel_id}
pub async fn delete_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.deactivate(channel_id).await?;
    Ok(Json(response))
}

/// Reactivate a soft-deleted channel
///
/// POST /v1/channels/{channel_id}/reactivate
pub async fn reactivate_channel(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.reactivate(channel_id).await?;
    Ok(Json(response))
}

/// Get channel basic info
///
/// GET /v1/channels/{channel_id}/basic
pub async fn get_basic_info(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<ChannelBasicInfoResponse>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ChannelService::new(state.service_context());
    let response = service.basic_info(channel_id).await?;
    Ok(Json(response))
}
