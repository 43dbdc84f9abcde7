//! Row <-> entity mappers

mod channel;

pub use channel::{assemble_channel, map_basic_info, map_member};
