//! Publisher port - the interface for domain event delivery
//!
//! Every successful store mutation is mirrored by exactly one published
//! event. Publishing happens after the mutation commits; a publish failure
//! is surfaced to the caller rather than rolled back, since there is no
//! cross-system transaction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::events::DomainEvent;

/// Event delivery port for domain events
///
/// Implementations serialize the event envelope and deliver it durably to
/// the topic exchange under the event's routing key. Failures surface as
/// `DomainError::BrokerUnavailable` (no connection) or
/// `DomainError::EventDelivery` (exchange unpublishable).
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a domain event under its routing key
    async fn publish(&self, event: &DomainEvent) -> Result<(), DomainError>;
}
