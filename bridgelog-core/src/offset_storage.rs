//! Wrap/unwrap helpers for the host's opaque offset storage. This module is
//! intentionally stateless: `OffsetStorage` in `traits.rs` is the thing that
//! actually persists bytes somewhere, this just shapes the keys and values
//! it is handed.

use serde_json::{Map, Value};

use crate::topic_partition::TopicPartition;

const FIELD_SOURCE_ALIAS: &str = "source_cluster_alias";
const FIELD_TOPIC: &str = "topic";
const FIELD_PARTITION: &str = "partition";
const FIELD_OFFSET: &str = "offset";

/// Build the storage key for a partition's source-side progress.
pub fn wrap_partition(source_cluster_alias: &str, partition: &TopicPartition) -> Value {
    let mut map = Map::new();
    map.insert(FIELD_SOURCE_ALIAS.into(), Value::String(source_cluster_alias.to_string()));
    map.insert(FIELD_TOPIC.into(), Value::String(partition.topic.clone()));
    map.insert(FIELD_PARTITION.into(), Value::Number(partition.partition.into()));
    Value::Object(map)
}

/// Build the storage value for a source offset.
pub fn wrap_offset(offset: i64) -> Value {
    let mut map = Map::new();
    map.insert(FIELD_OFFSET.into(), Value::Number(offset.into()));
    Value::Object(map)
}

/// Extract an offset from a previously-wrapped value. Tolerant of a missing
/// key, a non-object value, or a missing/non-numeric `offset` field -- all of
/// these mean "no committed offset", not an error.
pub fn unwrap_offset(value: Option<&Value>) -> i64 {
    value
        .and_then(Value::as_object)
        .and_then(|map| map.get(FIELD_OFFSET))
        .and_then(Value::as_i64)
        .unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json_shapes() {
        let tp = TopicPartition::new("orders", 2);
        let key = wrap_partition("east", &tp);
        assert_eq!(key["topic"], "orders");
        assert_eq!(key["partition"], 2);

        let value = wrap_offset(42);
        assert_eq!(unwrap_offset(Some(&value)), 42);
    }

    #[test]
    fn missing_value_unwraps_to_sentinel() {
        assert_eq!(unwrap_offset(None), -1);
    }

    #[test]
    fn malformed_value_unwraps_to_sentinel() {
        let garbage = Value::String("not an object".into());
        assert_eq!(unwrap_offset(Some(&garbage)), -1);

        let missing_field = Value::Object(Map::new());
        assert_eq!(unwrap_offset(Some(&missing_field)), -1);
    }
}
