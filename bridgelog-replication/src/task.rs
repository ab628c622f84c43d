//! The replication pump: owns a source consumer and a dedicated
//! offset-sync producer, and is driven by the host one `poll`/
//! `commit_record` call at a time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bridgelog_core::error::Result;
use bridgelog_core::offset_storage::{unwrap_offset, wrap_partition, wrap_offset};
use bridgelog_core::offset_sync::{self, OffsetSync};
use bridgelog_core::record::{ForwardedRecord, RecordMetadata};
use bridgelog_core::task_assignment::TaskAssignment;
use bridgelog_core::topic_partition::TopicPartition;
use bridgelog_core::traits::{MetricsSink, OffsetStorage, OffsetSyncProducer, SourceConsumer};
use tokio::sync::{Mutex, Semaphore};

use crate::partition_state::PartitionState;

/// Bounds the number of offset-sync sends in flight at once.
pub const MAX_OUTSTANDING_OFFSET_SYNCS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    Running,
    Stopping,
    Stopped,
}

struct TaskInner {
    state: TaskState,
    stopping: bool,
    partition_states: HashMap<TopicPartition, PartitionState>,
}

pub struct ReplicationTask {
    assignment: TaskAssignment,
    consumer: Arc<dyn SourceConsumer>,
    offset_producer: Arc<dyn OffsetSyncProducer>,
    offset_storage: Arc<dyn OffsetStorage>,
    metrics: Arc<dyn MetricsSink>,
    semaphore: Arc<Semaphore>,
    inner: Mutex<TaskInner>,
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

impl ReplicationTask {
    pub fn new(
        assignment: TaskAssignment,
        consumer: Arc<dyn SourceConsumer>,
        offset_producer: Arc<dyn OffsetSyncProducer>,
        offset_storage: Arc<dyn OffsetStorage>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            assignment,
            consumer,
            offset_producer,
            offset_storage,
            metrics,
            semaphore: Arc::new(Semaphore::new(MAX_OUTSTANDING_OFFSET_SYNCS)),
            inner: Mutex::new(TaskInner {
                state: TaskState::Created,
                stopping: false,
                partition_states: HashMap::new(),
            }),
        }
    }

    pub async fn state(&self) -> TaskState {
        self.inner.lock().await.state
    }

    /// Seeds consumer positions from `OffsetStorage`, assigns partitions, and
    /// enters `Running`. The stored offset is the last *delivered* one, so
    /// the seek target is `stored + 1`; with no stored position the consumer
    /// is left at its default (earliest).
    pub async fn start(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;

        self.consumer.assign(&self.assignment.assigned_partitions).await?;

        for partition in &self.assignment.assigned_partitions {
            let key = wrap_partition(&self.assignment.source_cluster_alias, partition);
            let stored = self.offset_storage.get(&key).await?;
            let offset = unwrap_offset(stored.as_ref());
            if offset >= 0 {
                self.consumer.seek(partition, offset + 1).await?;
            }
            inner
                .partition_states
                .insert(partition.clone(), PartitionState::new(self.assignment.max_offset_lag));
        }

        inner.state = TaskState::Running;
        Ok(())
    }

    /// One iteration of the polling loop. Returns `None` when
    /// there is nothing to forward, including on a clean wake/interrupt or a
    /// transient poll fault -- the host is expected to call again.
    pub async fn poll(&self) -> Result<Option<Vec<ForwardedRecord>>> {
        let inner = self.inner.lock().await;
        if inner.stopping || inner.state != TaskState::Running {
            return Ok(None);
        }

        let timeout = Duration::from_millis(self.assignment.poll_timeout_ms);
        let records = match self.consumer.poll(timeout).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "source poll failed, returning empty batch");
                return Ok(None);
            }
        };
        drop(inner);

        if records.is_empty() {
            return Ok(None);
        }

        let mut forwarded = Vec::with_capacity(records.len());
        let now = now_millis();
        for record in &records {
            let target_topic = self
                .assignment
                .replication_policy
                .format_remote_topic(&self.assignment.source_cluster_alias, &record.partition.topic);
            self.metrics.record_age(&record.partition, now - record.timestamp_millis);
            self.metrics.record_bytes(&record.partition, record.size_bytes());
            forwarded.push(ForwardedRecord::from_source(record, target_topic));
        }
        Ok(Some(forwarded))
    }

    /// Invoked by the host once the target cluster has acknowledged a
    /// forwarded record.
    pub async fn commit_record(
        &self,
        source_partition: &TopicPartition,
        source_offset: i64,
        source_timestamp_millis: i64,
        metadata: RecordMetadata,
    ) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.stopping {
            return Ok(());
        }

        // The source offset is always known, independent of whether the
        // target ack carried a usable downstream offset, so resumable
        // progress gets persisted unconditionally.
        let key = wrap_partition(&self.assignment.source_cluster_alias, source_partition);
        self.offset_storage.set(key, wrap_offset(source_offset)).await?;

        let Some(downstream_offset) = metadata.offset else {
            tracing::debug!(partition = %source_partition, "commit without downstream offset, skipping");
            return Ok(());
        };

        self.metrics.replication_latency(source_partition, now_millis() - source_timestamp_millis);
        self.metrics.count_record(source_partition);

        let max_offset_lag = self.assignment.max_offset_lag;
        let state = inner
            .partition_states
            .entry(source_partition.clone())
            .or_insert_with(|| PartitionState::new(max_offset_lag));
        let emit = state.update(source_offset, downstream_offset);
        drop(inner);

        if emit {
            self.send_offset_sync(source_partition.clone(), source_offset, downstream_offset);
        }
        Ok(())
    }

    /// Non-blocking: drops the sync on the floor if the semaphore is full,
    /// since the decision rule will re-fire on the next qualifying commit.
    fn send_offset_sync(&self, partition: TopicPartition, upstream: i64, downstream: i64) {
        let permit = match self.semaphore.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                tracing::debug!(partition = %partition, "offset-sync semaphore full, dropping sync");
                return;
            }
        };

        let producer = self.offset_producer.clone();
        let topic = self.assignment.offset_syncs_topic.clone();
        tokio::spawn(async move {
            let sync = OffsetSync::new(partition.clone(), upstream, downstream);
            let key = offset_sync::encode_key(&sync.partition);
            let value = offset_sync::encode_value(&sync);
            if let Err(err) = producer.send(&topic, 0, key, value).await {
                tracing::warn!(partition = %partition, error = %err, "offset-sync send failed");
            }
            drop(permit);
        });
    }

    /// Interrupts any in-progress poll, then closes consumer and producer
    /// under the task lock with bounded timeouts.
    pub async fn stop(&self) -> Result<()> {
        self.consumer.wake();

        let mut inner = self.inner.lock().await;
        inner.stopping = true;
        inner.state = TaskState::Stopping;

        let close_timeout = Duration::from_millis(500);
        if let Err(err) = self.consumer.close(close_timeout).await {
            tracing::warn!(error = %err, "consumer close failed during shutdown");
        }
        if let Err(err) = self.offset_producer.close(close_timeout).await {
            tracing::warn!(error = %err, "offset producer close failed during shutdown");
        }
        self.metrics.close();

        inner.state = TaskState::Stopped;
        Ok(())
    }
}
