//! Binary key/value codec for the offset-syncs compacted topic.
//!
//! The key encodes only `(topic, partition)` and must stay byte-stable across
//! restarts, since log compaction keys on it. The value redundantly carries
//! the topic-partition plus both offsets, so a consumer of the topic never
//! needs to assume key/value pairing.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{BridgeError, Result};
use crate::topic_partition::TopicPartition;

/// One `(upstream, downstream)` offset pin for a partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetSync {
    pub partition: TopicPartition,
    pub upstream_offset: i64,
    pub downstream_offset: i64,
}

impl OffsetSync {
    pub fn new(partition: TopicPartition, upstream_offset: i64, downstream_offset: i64) -> Self {
        Self { partition, upstream_offset, downstream_offset }
    }
}

fn put_topic_partition(buf: &mut BytesMut, tp: &TopicPartition) {
    let topic_bytes = tp.topic.as_bytes();
    buf.put_u32_le(topic_bytes.len() as u32);
    buf.put_slice(topic_bytes);
    buf.put_u32_le(tp.partition);
}

fn get_topic_partition(buf: &mut Bytes) -> Result<TopicPartition> {
    if buf.remaining() < 4 {
        return Err(BridgeError::CodecError("truncated topic length".into()));
    }
    let topic_len = buf.get_u32_le() as usize;
    if buf.remaining() < topic_len + 4 {
        return Err(BridgeError::CodecError("truncated topic/partition".into()));
    }
    let topic_bytes = buf.copy_to_bytes(topic_len);
    let topic = String::from_utf8(topic_bytes.to_vec())
        .map_err(|e| BridgeError::CodecError(e.to_string()))?;
    let partition = buf.get_u32_le();
    Ok(TopicPartition::new(topic, partition))
}

/// Encode the compaction key for a partition. Stable across process restarts
/// as long as the topic name and partition number are unchanged.
pub fn encode_key(tp: &TopicPartition) -> Bytes {
    let mut buf = BytesMut::with_capacity(8 + tp.topic.len());
    put_topic_partition(&mut buf, tp);
    buf.freeze()
}

/// Encode the self-describing value: topic-partition plus both offsets.
pub fn encode_value(sync: &OffsetSync) -> Bytes {
    let mut buf = BytesMut::with_capacity(16 + tp_len(&sync.partition));
    put_topic_partition(&mut buf, &sync.partition);
    buf.put_i64_le(sync.upstream_offset);
    buf.put_i64_le(sync.downstream_offset);
    buf.freeze()
}

fn tp_len(tp: &TopicPartition) -> usize {
    4 + tp.topic.len() + 4
}

/// Decode a record pulled from the offset-syncs topic. Tolerant of extra
/// trailing bytes in the value; only the key bytes this codec produced are
/// required to round-trip.
pub fn decode_record(key_bytes: &[u8], value_bytes: &[u8]) -> Result<OffsetSync> {
    let mut value = Bytes::copy_from_slice(value_bytes);
    let partition = get_topic_partition(&mut value)?;

    if value.remaining() < 16 {
        return Err(BridgeError::CodecError("truncated offset pair".into()));
    }
    let upstream_offset = value.get_i64_le();
    let downstream_offset = value.get_i64_le();

    // The key is authoritative for compaction but we don't need to parse it
    // back out here; a non-empty key is the only invariant we assert.
    if key_bytes.is_empty() {
        return Err(BridgeError::CodecError("empty offset-sync key".into()));
    }

    Ok(OffsetSync { partition, upstream_offset, downstream_offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable_for_same_partition() {
        let tp = TopicPartition::new("orders", 3);
        assert_eq!(encode_key(&tp), encode_key(&tp));
    }

    #[test]
    fn value_round_trips() {
        let sync = OffsetSync::new(TopicPartition::new("orders", 3), 100, 5000);
        let key = encode_key(&sync.partition);
        let value = encode_value(&sync);

        let decoded = decode_record(&key, &value).unwrap();
        assert_eq!(decoded, sync);
    }

    #[test]
    fn decode_tolerates_trailing_bytes() {
        let sync = OffsetSync::new(TopicPartition::new("t", 0), 1, 2);
        let key = encode_key(&sync.partition);
        let mut value = encode_value(&sync).to_vec();
        value.extend_from_slice(b"future-field-we-dont-know-about");

        let decoded = decode_record(&key, &value).unwrap();
        assert_eq!(decoded, sync);
    }

    #[test]
    fn decode_rejects_empty_key() {
        let sync = OffsetSync::new(TopicPartition::new("t", 0), 1, 2);
        let value = encode_value(&sync);
        assert!(decode_record(&[], &value).is_err());
    }

    proptest::proptest! {
        #[test]
        fn round_trip_is_lossless(
            topic in "[a-z]{1,16}",
            partition in 0u32..1000,
            upstream in -1i64..1_000_000,
            downstream in -1i64..1_000_000,
        ) {
            let sync = OffsetSync::new(TopicPartition::new(topic, partition), upstream, downstream);
            let key = encode_key(&sync.partition);
            let value = encode_value(&sync);
            let decoded = decode_record(&key, &value).unwrap();
            proptest::prop_assert_eq!(decoded, sync);
        }
    }
}
