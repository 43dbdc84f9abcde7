//! Store implementations
//!
//! PostgreSQL implementation of the `ChannelStore` port defined in
//! channel-core. Every guarded mutation is one predicate-guarded statement.

mod channel;
mod error;

pub use channel::PgChannelStore;
pub use error::map_db_error;
