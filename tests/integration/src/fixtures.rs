//! Test fixtures and data generators
//!
//! Provides reusable test data and a pre-wired service context backed by
//! the in-memory store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use channel_core::ChannelType;
use channel_service::{CreateChannelRequest, ServiceContext, UpdateChannelRequest};

use crate::memory::{MemoryChannelStore, RecordingPublisher};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Service context wired to the in-memory store and recording publisher
pub struct TestContext {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryChannelStore>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryChannelStore::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let ctx = ServiceContext::new(store.clone(), publisher.clone());
        Self {
            ctx,
            store,
            publisher,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A unique create-channel request owned by `owner_id`
pub fn create_request(owner_id: &str) -> CreateChannelRequest {
    let suffix = unique_suffix();
    CreateChannelRequest {
        name: format!("test-channel-{suffix}"),
        owner_id: owner_id.to_string(),
        channel_type: ChannelType::Public,
        users: Vec::new(),
    }
}

/// A unique create-channel request with extra initial members
pub fn create_request_with_users(owner_id: &str, users: &[&str]) -> CreateChannelRequest {
    let mut request = create_request(owner_id);
    request.users = users.iter().map(ToString::to_string).collect();
    request
}

/// An update request changing only the name
pub fn rename_request(name: &str) -> UpdateChannelRequest {
    UpdateChannelRequest {
        name: Some(name.to_string()),
        owner_id: None,
        channel_type: None,
    }
}
