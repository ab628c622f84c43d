use bytes::Bytes;

use crate::topic_partition::TopicPartition;

/// A header carried verbatim from source to target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub key: String,
    pub value: Bytes,
}

impl RecordHeader {
    pub fn new(key: impl Into<String>, value: Bytes) -> Self {
        Self { key: key.into(), value }
    }
}

/// A single record as pulled from the source cluster.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub partition: TopicPartition,
    pub offset: i64,
    pub timestamp_millis: i64,
    pub key: Option<Bytes>,
    pub value: Option<Bytes>,
    pub headers: Vec<RecordHeader>,
}

impl SourceRecord {
    pub fn size_bytes(&self) -> usize {
        self.key.as_ref().map_or(0, |k| k.len()) + self.value.as_ref().map_or(0, |v| v.len())
    }
}

/// A record rewritten for publication onto the target cluster: same
/// key/value/timestamp/headers, renamed topic, same partition number as
/// the source.
#[derive(Debug, Clone)]
pub struct ForwardedRecord {
    pub target_topic: String,
    pub target_partition: u32,
    pub source_partition: TopicPartition,
    pub source_offset: i64,
    pub timestamp_millis: i64,
    pub key: Option<Bytes>,
    pub value: Option<Bytes>,
    pub headers: Vec<RecordHeader>,
}

impl ForwardedRecord {
    pub fn from_source(record: &SourceRecord, target_topic: String) -> Self {
        Self {
            target_topic,
            target_partition: record.partition.partition,
            source_partition: record.partition.clone(),
            source_offset: record.offset,
            timestamp_millis: record.timestamp_millis,
            key: record.key.clone(),
            value: record.value.clone(),
            headers: record.headers.clone(),
        }
    }
}

/// What the target cluster reports back once a forwarded record is
/// acknowledged. `offset` is `None` when the host could not determine a
/// concrete downstream offset.
#[derive(Debug, Clone, Copy)]
pub struct RecordMetadata {
    pub offset: Option<i64>,
}

impl RecordMetadata {
    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }
}
