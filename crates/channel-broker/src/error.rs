//! Broker error types

use channel_core::DomainError;

/// Error type for broker operations
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("Failed to create broker pool: {0}")]
    CreatePool(String),

    /// No broker connection is currently available
    #[error("Broker connection not available: {0}")]
    Connection(String),

    /// The target exchange stream cannot be confirmed to exist; distinct
    /// from plain connectivity failure so publish errors stay diagnosable
    #[error("Exchange not declared on the broker: {0}")]
    ExchangeMissing(String),

    #[error("Broker command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level envelope could not be decoded
    #[error("Malformed delivery: {0}")]
    Decode(String),

    #[error("Broker connection retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

impl BrokerError {
    /// True when the failure is a lost/absent connection rather than a
    /// command-level error
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Connection(_) | Self::RetriesExhausted { .. } => true,
            Self::Redis(e) => e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error(),
            _ => false,
        }
    }
}

impl From<deadpool_redis::PoolError> for BrokerError {
    fn from(e: deadpool_redis::PoolError) -> Self {
        Self::Connection(e.to_string())
    }
}

impl From<BrokerError> for DomainError {
    fn from(e: BrokerError) -> Self {
        match e {
            BrokerError::Connection(msg) => DomainError::BrokerUnavailable(msg),
            BrokerError::RetriesExhausted { attempts } => {
                DomainError::BrokerUnavailable(format!("retries exhausted after {attempts} attempts"))
            }
            other => DomainError::EventDelivery(other.to_string()),
        }
    }
}

/// Result type for broker operations
pub type BrokerResult<T> = Result<T, BrokerError>;
