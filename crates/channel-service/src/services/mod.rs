//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation, orchestration of store operations, and event publication.

pub mod channel;
pub mod context;
pub mod error;
pub mod member;
pub mod thread;

// Re-export all services for convenience
pub use channel::ChannelService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use thread::ThreadService;
