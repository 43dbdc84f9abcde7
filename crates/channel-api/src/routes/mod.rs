//! Route definitions
//!
//! All API routes organized by domain and mounted under /v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{channels, health, members, threads};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/v1", v1_routes())
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// V1 routes
fn v1_routes() -> Router<AppState> {
    Router::new()
        .merge(channel_routes())
        .merge(member_routes())
        .merge(thread_routes())
}

/// Channel lifecycle routes
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route("/channels", post(channels::create_channel))
        .route("/channels", get(channels::list_channels))
        .route("/channels/:channel_id", get(channels::get_channel))
        .route("/channels/:channel_id", put(channels::update_channel))
        .route("/channels/:channel_id", delete(channels::delete_channel))
        .route(
            "/channels/:channel_id/reactivate",
            post(channels::reactivate_channel),
        )
        .route("/channels/:channel_id/basic", get(channels::get_basic_info))
}

/// Membership routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", post(members::add_member))
        .route("/members", delete(members::remove_member))
        .route("/members/:user_id", get(members::get_member_channels))
        .route("/members/owner/:owner_id", get(members::get_owner_channels))
        .route("/members/:channel_id/ids", get(members::get_member_page))
}

/// Thread association routes
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/threads", post(threads::attach_thread))
        .route("/threads", delete(threads::detach_thread))
        .route("/threads/:thread_id", get(threads::get_thread_channel))
        .route(
            "/threads/channel/:channel_id",
            get(threads::get_channel_threads),
        )
}
