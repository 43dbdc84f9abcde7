//! Database models - SQLx-compatible structs for PostgreSQL rows

mod channel;

pub use channel::{BasicInfoRow, ChannelRow, MemberRow, ThreadRow};
