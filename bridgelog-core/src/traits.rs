use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::record::{RecordMetadata, SourceRecord};
use crate::topic_partition::TopicPartition;

/// Pulls record batches from the source cluster. Implemented by the host
/// against its broker client; this crate never opens a socket.
///
/// All methods take `&self`: a real broker client is internally
/// synchronized (this mirrors how a shared `rdkafka`-style consumer handle
/// behaves), which lets `wake` interrupt a concurrently in-progress `poll`
/// without the task needing to hold any lock across it.
#[async_trait]
pub trait SourceConsumer: Send + Sync {
    /// Assign the given partitions for consumption.
    async fn assign(&self, partitions: &[TopicPartition]) -> Result<()>;

    /// Seek a partition to the given offset before polling begins.
    async fn seek(&self, partition: &TopicPartition, offset: i64) -> Result<()>;

    /// Block up to `timeout` waiting for records; may return early if `wake`
    /// is called from another thread.
    async fn poll(&self, timeout: Duration) -> Result<Vec<SourceRecord>>;

    /// Interrupt an in-progress `poll`. Safe to call from any thread.
    fn wake(&self);

    /// Close the consumer, allowing up to `timeout` for network teardown.
    async fn close(&self, timeout: Duration) -> Result<()>;
}

/// A dedicated producer used only for the offset-syncs topic -- the task's
/// own "target-producer". The bulk of forwarded records are published by
/// the host's own producer machinery, not through this trait.
#[async_trait]
pub trait OffsetSyncProducer: Send + Sync {
    async fn send(&self, topic: &str, partition: u32, key: Bytes, value: Bytes) -> Result<RecordMetadata>;

    async fn close(&self, timeout: Duration) -> Result<()>;
}

/// Opaque key/value storage the host provides for persisting source-side
/// progress. This crate never interprets the storage mechanism.
#[async_trait]
pub trait OffsetStorage: Send + Sync {
    async fn get(&self, key: &serde_json::Value) -> Result<Option<serde_json::Value>>;
    async fn set(&self, key: serde_json::Value, value: serde_json::Value) -> Result<()>;
}

/// Per-task metrics fan-in. Reporters are registered externally;
/// implementations here only record.
pub trait MetricsSink: Send + Sync {
    fn record_age(&self, partition: &TopicPartition, age_millis: i64);
    fn record_bytes(&self, partition: &TopicPartition, bytes: usize);
    fn count_record(&self, partition: &TopicPartition);
    fn replication_latency(&self, partition: &TopicPartition, latency_millis: i64);
    fn close(&self);
}
