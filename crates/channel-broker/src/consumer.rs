//! Durable queue consumer pipeline
//!
//! One long-lived consumer per logical queue. Deliveries are read through
//! the consumer group with a bounded in-flight window (prefetch) and run
//! through an explicit pipeline stage: decode, match against the binding
//! pattern, dispatch to the handler, then ack on success or route to the
//! dead-letter stream (and ack the source entry) on failure. Dead-lettering
//! is the only retry mechanism; there is no in-process retry loop.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::streams::{StreamReadOptions, StreamReadReply};
use redis::AsyncCommands;
use tracing::{debug, error, info, warn};

use channel_common::ConsumerRetryConfig;

use crate::clients::BrokerClient;
use crate::error::{BrokerError, BrokerResult};
use crate::pool::BrokerPool;
use crate::routing::topic_matches;

/// How long one group read blocks waiting for entries
const READ_BLOCK: Duration = Duration::from_secs(5);

/// One message delivered from a queue
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Broker-assigned entry id, used for acknowledgement
    pub id: String,
    /// Topic routing key the entry was published under
    pub routing_key: String,
    /// Serialized message body
    pub body: Vec<u8>,
}

/// Handler invoked once per dispatched delivery
///
/// Returning `Ok` acknowledges the delivery; returning `Err` routes it to
/// the dead-letter stream without requeueing.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, delivery: &Delivery) -> anyhow::Result<()>;
}

/// Long-lived consumer over one logical client's queue
pub struct Consumer {
    pool: BrokerPool,
    client: BrokerClient,
    consumer_name: String,
    retry: ConsumerRetryConfig,
}

impl Consumer {
    /// Create a consumer for a logical client
    pub fn new(
        pool: BrokerPool,
        client: BrokerClient,
        consumer_name: impl Into<String>,
        retry: ConsumerRetryConfig,
    ) -> Self {
        Self {
            pool,
            client,
            consumer_name: consumer_name.into(),
            retry,
        }
    }

    /// Establish broker connectivity with bounded retry
    ///
    /// Exhausting the attempt budget is fatal and propagates to process
    /// startup.
    pub async fn connect(&self) -> BrokerResult<()> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.pool.health_check().await {
                Ok(()) => {
                    info!(
                        queue = %self.client.topology.queue,
                        attempt,
                        "Broker connection established"
                    );
                    return Ok(());
                }
                Err(e) if attempt < self.retry.max_attempts => {
                    warn!(
                        queue = %self.client.topology.queue,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %e,
                        "Broker connection failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
                }
                Err(e) => {
                    error!(
                        queue = %self.client.topology.queue,
                        attempts = attempt,
                        error = %e,
                        "Broker connection retries exhausted"
                    );
                    return Err(BrokerError::RetriesExhausted { attempts: attempt });
                }
            }
        }
    }

    /// Run the consume loop until a fatal error
    ///
    /// Connection loss re-enters the bounded-retry connect; command-level
    /// errors on a single delivery never stop the loop.
    pub async fn run(&self, handler: Arc<dyn MessageHandler>) -> BrokerResult<()> {
        self.connect().await?;
        info!(
            queue = %self.client.topology.queue,
            binding_key = %self.client.binding_key,
            prefetch = self.client.prefetch,
            "Consumer started"
        );

        loop {
            match self.read_batch(self.client.prefetch, READ_BLOCK).await {
                Ok(entries) => {
                    for entry in entries {
                        self.process_entry(&entry, handler.as_ref()).await;
                    }
                }
                Err(e) if e.is_connection() => {
                    warn!(
                        queue = %self.client.topology.queue,
                        error = %e,
                        "Broker connection lost, reconnecting"
                    );
                    self.connect().await?;
                }
                Err(e) => {
                    error!(
                        queue = %self.client.topology.queue,
                        error = %e,
                        "Consumer read failed"
                    );
                    tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
                }
            }
        }
    }

    /// Demand-pull a single message, waiting up to `timeout`
    ///
    /// Returns `Ok(None)` when no message is available within the timeout.
    /// The fetched entry is acknowledged on retrieval.
    pub async fn fetch_one(&self, timeout: Duration) -> BrokerResult<Option<Delivery>> {
        let entries = self.read_batch(1, timeout).await?;
        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };
        let delivery = decode_entry(&entry)?;
        self.ack(&entry.id).await?;
        Ok(Some(delivery))
    }

    /// Explicit per-delivery pipeline: decode, filter, dispatch, settle
    async fn process_entry(&self, entry: &RawEntry, handler: &dyn MessageHandler) {
        let delivery = match decode_entry(entry) {
            Ok(delivery) => delivery,
            Err(e) => {
                // Transport-level decode failure: dead-letter the raw entry
                warn!(
                    queue = %self.client.topology.queue,
                    entry_id = %entry.id,
                    error = %e,
                    "Malformed delivery, routing to dead-letter queue"
                );
                self.settle_failed(entry, &e.to_string()).await;
                return;
            }
        };

        if !topic_matches(&self.client.binding_key, &delivery.routing_key) {
            // Not bound for this consumer: acknowledge without dispatch
            debug!(
                routing_key = %delivery.routing_key,
                binding_key = %self.client.binding_key,
                "Delivery outside binding pattern, acknowledged"
            );
            self.settle_ok(&entry.id).await;
            return;
        }

        match handler.handle(&delivery).await {
            Ok(()) => {
                debug!(entry_id = %delivery.id, "Delivery acknowledged");
                self.settle_ok(&entry.id).await;
            }
            Err(e) => {
                warn!(
                    entry_id = %delivery.id,
                    routing_key = %delivery.routing_key,
                    error = %e,
                    "Handler failed, routing to dead-letter queue"
                );
                self.settle_failed(entry, &e.to_string()).await;
            }
        }
    }

    async fn read_batch(&self, count: usize, block: Duration) -> BrokerResult<Vec<RawEntry>> {
        let mut conn = self.pool.get().await?;
        let options = StreamReadOptions::default()
            .group(&self.client.topology.queue, &self.consumer_name)
            .count(count)
            .block(block.as_millis() as usize);

        let reply: StreamReadReply = conn
            .xread_options(&[&self.client.topology.exchange], &[">"], &options)
            .await?;

        let mut entries = Vec::new();
        for key in reply.keys {
            for id in key.ids {
                entries.push(RawEntry {
                    id: id.id,
                    fields: id.map,
                });
            }
        }
        Ok(entries)
    }

    async fn ack(&self, entry_id: &str) -> BrokerResult<()> {
        let mut conn = self.pool.get().await?;
        conn.xack::<_, _, _, i64>(
            &self.client.topology.exchange,
            &self.client.topology.queue,
            &[entry_id],
        )
        .await?;
        Ok(())
    }

    /// Append a failed entry to the dead-letter stream, then ack the source
    async fn dead_letter(&self, entry: &RawEntry, reason: &str) -> BrokerResult<()> {
        let mut conn = self.pool.get().await?;

        let mut cmd = redis::cmd("XADD");
        cmd.arg(&self.client.topology.dead_letter_exchange).arg("*");
        for (field, value) in &entry.fields {
            let raw = redis::from_redis_value::<Vec<u8>>(value).unwrap_or_default();
            cmd.arg(field).arg(raw);
        }
        cmd.arg("error").arg(reason);
        cmd.arg("source").arg(&self.client.topology.exchange);
        cmd.query_async::<String>(&mut conn).await?;

        conn.xack::<_, _, _, i64>(
            &self.client.topology.exchange,
            &self.client.topology.queue,
            &[&entry.id],
        )
        .await?;
        Ok(())
    }

    async fn settle_ok(&self, entry_id: &str) {
        if let Err(e) = self.ack(entry_id).await {
            error!(entry_id = %entry_id, error = %e, "Failed to acknowledge delivery");
        }
    }

    async fn settle_failed(&self, entry: &RawEntry, reason: &str) {
        if let Err(e) = self.dead_letter(entry, reason).await {
            error!(entry_id = %entry.id, error = %e, "Failed to dead-letter delivery");
        }
    }
}

/// Undecoded stream entry
struct RawEntry {
    id: String,
    fields: HashMap<String, redis::Value>,
}

fn decode_entry(entry: &RawEntry) -> BrokerResult<Delivery> {
    let routing_key = entry
        .fields
        .get("routing_key")
        .and_then(|v| redis::from_redis_value::<String>(v).ok())
        .ok_or_else(|| BrokerError::Decode("missing routing_key field".to_string()))?;

    let body = entry
        .fields
        .get("body")
        .and_then(|v| redis::from_redis_value::<Vec<u8>>(v).ok())
        .ok_or_else(|| BrokerError::Decode("missing body field".to_string()))?;

    Ok(Delivery {
        id: entry.id.clone(),
        routing_key,
        body,
    })
}
