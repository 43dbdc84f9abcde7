//! Thread handlers
//!
//! Endpoints for the thread-to-channel association.

use axum::{
    extract::{Path, State},
    Json,
};
use channel_core::ChannelId;
use channel_service::{ChannelResponse, ThreadRequest, ThreadService};

use crate::extractors::ValidatedJson;
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

fn parse_channel_id(raw: &str) -> Result<ChannelId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid channel_id format"))
}

/// Attach a thread to a channel
///
/// POST /v1/threads
pub async fn attach_thread(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ThreadRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let channel_id = parse_channel_id(&request.channel_id)?;

    let service = ThreadService::new(state.service_context());
    let response = service.attach(channel_id, &request.thread_id).await?;
    Ok(Created(Json(response)))
}

/// Detach a thread from its channel
///
/// DELETE /v1/threads
pub async fn detach_thread(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ThreadRequest>,
) -> ApiResult<Json<ChannelResponse>> {
    let channel_id = parse_channel_id(&request.channel_id)?;

    let service = ThreadService::new(state.service_context());
    let response = service.detach(channel_id, &request.thread_id).await?;
    Ok(Json(response))
}

/// Get the channel a thread is attached to
///
/// GET /v1/threads/{thread_id}
pub async fn get_thread_channel(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let service = ThreadService::new(state.service_context());
    let response = service.get_by_thread(&thread_id).await?;
    Ok(Json(response))
}

/// List thread ids attached to a channel
///
/// GET /v1/threads/channel/{channel_id}
pub async fn get_channel_threads(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    let channel_id = parse_channel_id(&channel_id)?;

    let service = ThreadService::new(state.service_context());
    let response = service.threads_of(channel_id).await?;
    Ok(Json(response))
}
