//! Service context - dependency container for services
//!
//! Holds the store and publisher ports every service needs. Services borrow
//! the context; the API layer owns one `ServiceContext` behind an `Arc`.

use std::sync::Arc;

use channel_core::traits::{ChannelStore, EventPublisher};

/// Service context containing all dependencies
///
/// Both dependencies are trait objects so the service layer stays free of
/// any concrete database or broker types.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn ChannelStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(store: Arc<dyn ChannelStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }

    /// Get the channel store
    pub fn store(&self) -> &dyn ChannelStore {
        self.store.as_ref()
    }

    /// Get the event publisher
    pub fn publisher(&self) -> &dyn EventPublisher {
        self.publisher.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn ChannelStore")
            .field("publisher", &"dyn EventPublisher")
            .finish()
    }
}
