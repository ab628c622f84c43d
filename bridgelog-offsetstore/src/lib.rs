//! The offset-syncs topic materialized as an in-memory map. Owns a single
//! consumer assigned to `(offsetSyncsTopic, partition 0)`, starting from
//! the earliest retained record, and folds every fetched record into a
//! `TopicPartition -> OffsetSync` map.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bridgelog_core::error::Result;
use bridgelog_core::offset_sync::{self, OffsetSync};
use bridgelog_core::topic_partition::TopicPartition;
use bridgelog_core::traits::SourceConsumer;
use parking_lot::RwLock;
use tokio::sync::Mutex as AsyncMutex;

/// Sentinel returned by `translate_downstream` when the query predates the
/// oldest sync this store has observed.
pub const NOT_TRANSLATABLE: i64 = -1;

struct Inner {
    consumer: Arc<dyn SourceConsumer>,
    map: RwLock<HashMap<TopicPartition, OffsetSync>>,
    /// Serializes `update` and `close` against each other; `translate_downstream`
    /// never takes this lock since it does no I/O.
    mutating: AsyncMutex<()>,
    closing: AtomicBool,
}

/// Cheap to clone: internally an `Arc`, so scheduling `close` on a
/// background task never needs the caller to wrap the store in its own Arc.
#[derive(Clone)]
pub struct OffsetSyncStore(Arc<Inner>);

impl OffsetSyncStore {
    /// Assigns the consumer to `(offset_syncs_topic, 0)` and starts from
    /// earliest (the caller's `SourceConsumer` impl is expected to default
    /// to earliest when no offset is explicitly sought).
    pub async fn new(offset_syncs_topic: &str, consumer: Arc<dyn SourceConsumer>) -> Result<Self> {
        let partition = TopicPartition::new(offset_syncs_topic, 0);
        consumer.assign(&[partition]).await?;
        Ok(Self(Arc::new(Inner {
            consumer,
            map: RwLock::new(HashMap::new()),
            mutating: AsyncMutex::new(()),
            closing: AtomicBool::new(false),
        })))
    }

    /// Translate a source-side offset to its best-known target-side offset.
    pub fn translate_downstream(&self, partition: &TopicPartition, upstream: i64) -> i64 {
        let map = self.0.map.read();
        let Some(sync) = map.get(partition) else {
            return NOT_TRANSLATABLE;
        };

        if sync.upstream_offset > upstream {
            return NOT_TRANSLATABLE;
        }
        sync.downstream_offset + (upstream - sync.upstream_offset)
    }

    /// Blocks up to `poll_timeout` and folds every fetched record into the
    /// map. A no-op once `close` has been scheduled.
    pub async fn update(&self, poll_timeout: Duration) -> Result<()> {
        let _guard = self.0.mutating.lock().await;
        if self.0.closing.load(Ordering::SeqCst) {
            return Ok(());
        }

        let records = self.0.consumer.poll(poll_timeout).await?;
        if records.is_empty() {
            return Ok(());
        }

        let mut map = self.0.map.write();
        for record in &records {
            let (Some(key), Some(value)) = (&record.key, &record.value) else {
                tracing::warn!(partition = %record.partition, "offset-sync record missing key or value, skipping");
                continue;
            };
            match offset_sync::decode_record(key, value) {
                Ok(sync) => {
                    map.insert(sync.partition.clone(), sync);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "malformed offset-sync record, skipping");
                }
            }
        }
        Ok(())
    }

    /// Schedules consumer shutdown off the caller's thread and returns
    /// immediately. Safe to call concurrently with `translate_downstream`.
    pub fn close(&self, timeout: Duration) {
        self.0.closing.store(true, Ordering::SeqCst);
        let inner = self.0.clone();
        tokio::spawn(async move {
            let _guard = inner.mutating.lock().await;
            if let Err(err) = inner.consumer.close(timeout).await {
                tracing::warn!(error = %err, "offset-sync consumer close failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridgelog_core::record::SourceRecord;
    use std::sync::atomic::AtomicBool as StdAtomicBool;

    #[derive(Default)]
    struct FakeConsumer {
        batch: parking_lot::Mutex<Vec<Vec<SourceRecord>>>,
        woken: StdAtomicBool,
    }

    #[async_trait]
    impl SourceConsumer for FakeConsumer {
        async fn assign(&self, _partitions: &[TopicPartition]) -> Result<()> {
            Ok(())
        }

        async fn seek(&self, _partition: &TopicPartition, _offset: i64) -> Result<()> {
            Ok(())
        }

        async fn poll(&self, _timeout: Duration) -> Result<Vec<SourceRecord>> {
            Ok(self.batch.lock().pop().unwrap_or_default())
        }

        fn wake(&self) {
            self.woken.store(true, Ordering::SeqCst);
        }

        async fn close(&self, _timeout: Duration) -> Result<()> {
            Ok(())
        }
    }

    fn sync_record(tp: TopicPartition, upstream: i64, downstream: i64) -> SourceRecord {
        let sync = OffsetSync::new(tp.clone(), upstream, downstream);
        SourceRecord {
            partition: TopicPartition::new("mm2-offset-syncs.west.internal", 0),
            offset: 0,
            timestamp_millis: 0,
            key: Some(offset_sync::encode_key(&tp)),
            value: Some(offset_sync::encode_value(&sync)),
            headers: vec![],
        }
    }

    #[tokio::test]
    async fn translate_before_any_sync_is_not_translatable() {
        let consumer = Arc::new(FakeConsumer::default());
        let store = OffsetSyncStore::new("mm2-offset-syncs.west.internal", consumer).await.unwrap();
        let tp = TopicPartition::new("orders", 0);
        assert_eq!(store.translate_downstream(&tp, 5), NOT_TRANSLATABLE);
    }

    #[tokio::test]
    async fn update_folds_records_and_translate_extrapolates() {
        let consumer = Arc::new(FakeConsumer::default());
        let tp = TopicPartition::new("orders", 0);
        consumer.batch.lock().push(vec![sync_record(tp.clone(), 100, 5000)]);

        let store = OffsetSyncStore::new("mm2-offset-syncs.west.internal", consumer).await.unwrap();
        store.update(Duration::from_millis(100)).await.unwrap();

        assert_eq!(store.translate_downstream(&tp, 100), 5000);
        assert_eq!(store.translate_downstream(&tp, 105), 5005);
        assert_eq!(store.translate_downstream(&tp, 50), NOT_TRANSLATABLE);
    }

    #[tokio::test]
    async fn close_is_a_noop_for_subsequent_update() {
        let consumer = Arc::new(FakeConsumer::default());
        let store = OffsetSyncStore::new("mm2-offset-syncs.west.internal", consumer).await.unwrap();
        store.close(Duration::from_millis(10));
        store.update(Duration::from_millis(10)).await.unwrap();
    }
}
