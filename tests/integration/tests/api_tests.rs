//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrated)
//! - Running Redis instance for the broker streams
//! - Environment variables: DATABASE_URL, BROKER_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use channel_service::{ChannelBasicInfoResponse, ChannelResponse, MemberPageResponse};
use integration_tests::{
    assert_json, assert_status, check_test_env, create_request, create_request_with_users,
    TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn create_channel(server: &TestServer, owner_id: &str) -> ChannelResponse {
    let response = server
        .post("/v1/channels", &create_request(owner_id))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["database"], "up");
    assert_eq!(body["broker"], "up");
}

// ============================================================================
// Channel CRUD Tests
// ============================================================================

#[tokio::test]
async fn test_channel_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let created = create_channel(&server, "lifecycle-owner").await;
    assert!(created.is_active);
    assert_eq!(created.users.len(), 1);

    // Read back
    let response = server
        .get(&format!("/v1/channels/{}", created.id))
        .await
        .unwrap();
    let fetched: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);

    // Rename
    let response = server
        .put(
            &format!("/v1/channels/{}", created.id),
            &json!({"name": "renamed-channel"}),
        )
        .await
        .unwrap();
    let updated: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "renamed-channel");

    // Soft delete returns the final state of the channel
    let response = server
        .delete(&format!("/v1/channels/{}", created.id))
        .await
        .unwrap();
    let deleted: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!deleted.is_active);
    assert!(deleted.deleted_at.is_some());

    // Inactive channels are gone from the active read path
    let response = server
        .get(&format!("/v1/channels/{}", created.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Second delete conflicts
    let response = server
        .delete(&format!("/v1/channels/{}", created.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Reactivate restores visibility
    let response = server
        .post_empty(&format!("/v1/channels/{}/reactivate", created.id))
        .await
        .unwrap();
    let restored: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(restored.is_active);
}

#[tokio::test]
async fn test_channel_basic_info() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let created = create_channel(&server, "basic-owner").await;

    let response = server
        .get(&format!("/v1/channels/{}/basic", created.id))
        .await
        .unwrap();
    let info: ChannelBasicInfoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(info.id, created.id);
    assert_eq!(info.user_count, 1);
}

#[tokio::test]
async fn test_channel_list_requires_pagination() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    create_channel(&server, "list-owner").await;

    let response = server.get("/v1/channels?page=1&page_size=10").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Missing and out-of-range parameters are rejected
    let response = server.get("/v1/channels").await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    let response = server.get("/v1/channels?page=0&page_size=10").await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    let response = server
        .get("/v1/channels?page=1&page_size=101")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_channel_invalid_id_formats() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Malformed UUID in the path
    let response = server.get("/v1/channels/not-a-uuid").await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    // Well-formed but unknown
    let response = server
        .get(&format!("/v1/channels/{}", Uuid::new_v4()))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_create_channel_validation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/v1/channels", &json!({"name": "", "owner_id": "o"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

// ============================================================================
// Membership Tests
// ============================================================================

#[tokio::test]
async fn test_member_add_and_remove() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let created = create_channel(&server, "member-owner").await;

    let body = json!({"channel_id": created.id, "user_id": "joiner"});

    let response = server.post("/v1/members", &body).await.unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(channel.users.len(), 2);

    // Duplicate add is rejected
    let response = server.post("/v1/members", &body).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Remove the joiner
    let response = server.delete_json("/v1/members", &body).await.unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(channel.users.len(), 1);

    // Owner removal is rejected
    let owner_body = json!({"channel_id": created.id, "user_id": "member-owner"});
    let response = server.delete_json("/v1/members", &owner_body).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_member_queries() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = format!("query-owner-{}", Uuid::new_v4());
    let member = format!("query-member-{}", Uuid::new_v4());

    let response = server
        .post(
            "/v1/channels",
            &create_request_with_users(&owner, &[member.as_str()]),
        )
        .await
        .unwrap();
    let created: ChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // By member
    let response = server.get(&format!("/v1/members/{member}")).await.unwrap();
    let channels: Vec<ChannelBasicInfoResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].id, created.id);

    // By owner
    let response = server
        .get(&format!("/v1/members/owner/{owner}"))
        .await
        .unwrap();
    let channels: Vec<ChannelBasicInfoResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(channels.len(), 1);

    // Member id page
    let response = server
        .get(&format!("/v1/members/{}/ids?page=1&page_size=10", created.id))
        .await
        .unwrap();
    let page: MemberPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.users.len(), 2);
    assert_eq!(page.page, 1);
}

// ============================================================================
// Thread Tests
// ============================================================================

#[tokio::test]
async fn test_thread_attach_detach_and_lookup() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = create_channel(&server, "thread-owner-1").await;
    let second = create_channel(&server, "thread-owner-2").await;
    let thread_id = format!("thread-{}", Uuid::new_v4());

    let attach = json!({"channel_id": first.id, "thread_id": thread_id});
    let response = server.post("/v1/threads", &attach).await.unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(channel.threads.contains(&thread_id));

    // The same thread cannot be attached to another channel
    let steal = json!({"channel_id": second.id, "thread_id": thread_id});
    let response = server.post("/v1/threads", &steal).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Reverse lookup
    let response = server.get(&format!("/v1/threads/{thread_id}")).await.unwrap();
    let owning: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(owning.id, first.id);

    // Thread list for the channel
    let response = server
        .get(&format!("/v1/threads/channel/{}", first.id))
        .await
        .unwrap();
    let threads: Vec<String> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(threads.contains(&thread_id));

    // Detach and confirm the lookup goes away
    let response = server.delete_json("/v1/threads", &attach).await.unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!channel.threads.contains(&thread_id));

    let response = server.get(&format!("/v1/threads/{thread_id}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
