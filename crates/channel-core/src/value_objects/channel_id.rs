//! Channel ID - opaque store-assigned identifier
//!
//! Wraps a UUID assigned by the document store on creation. The wrapper
//! keeps channel ids from being confused with the plain-string user and
//! thread ids that reference external systems.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(Uuid);

impl ChannelId {
    /// Create a ChannelId from a raw UUID
    #[inline]
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, ChannelIdParseError> {
        Uuid::parse_str(s)
            .map(ChannelId)
            .map_err(|_| ChannelIdParseError::InvalidFormat)
    }
}

/// Error when parsing a ChannelId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChannelIdParseError {
    #[error("invalid channel id format")]
    InvalidFormat,
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ChannelId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ChannelId> for Uuid {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl FromStr for ChannelId {
    type Err = ChannelIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelId::parse(s)
    }
}
