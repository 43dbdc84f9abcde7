//! # channel-db
//!
//! Storage layer implementing the `ChannelStore` port with PostgreSQL via SQLx.
//!
//! Every guarded mutation is issued as a single SQL statement whose `WHERE`
//! clause carries both the identity predicate and the operation's
//! precondition, so the predicate check and the patch are atomic store-side.
//! Business code never performs read-then-write across two round trips.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, PgPool, StoreConfig};
pub use repositories::PgChannelStore;
