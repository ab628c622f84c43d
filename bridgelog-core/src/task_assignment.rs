use std::sync::Arc;

use crate::policy::{DefaultReplicationPolicy, ReplicationPolicy};
use crate::topic_partition::TopicPartition;

pub const DEFAULT_MAX_OFFSET_LAG: i64 = 100;
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 1000;

/// Everything a `ReplicationTask` needs to start. Built by the host from
/// its own configuration and handed to the task at creation.
#[derive(Clone)]
pub struct TaskAssignment {
    pub source_cluster_alias: String,
    pub target_cluster_alias: String,
    pub assigned_partitions: Vec<TopicPartition>,
    pub max_offset_lag: i64,
    pub poll_timeout_ms: u64,
    pub offset_syncs_topic: String,
    pub replication_policy: Arc<dyn ReplicationPolicy>,
}

impl TaskAssignment {
    pub fn new(
        source_cluster_alias: impl Into<String>,
        target_cluster_alias: impl Into<String>,
        assigned_partitions: Vec<TopicPartition>,
    ) -> Self {
        let target_cluster_alias = target_cluster_alias.into();
        let offset_syncs_topic = format!("mm2-offset-syncs.{target_cluster_alias}.internal");
        Self {
            source_cluster_alias: source_cluster_alias.into(),
            target_cluster_alias,
            assigned_partitions,
            max_offset_lag: DEFAULT_MAX_OFFSET_LAG,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            offset_syncs_topic,
            replication_policy: Arc::new(DefaultReplicationPolicy::default()),
        }
    }

    pub fn with_max_offset_lag(mut self, max_offset_lag: i64) -> Self {
        self.max_offset_lag = max_offset_lag;
        self
    }

    pub fn with_poll_timeout_ms(mut self, poll_timeout_ms: u64) -> Self {
        self.poll_timeout_ms = poll_timeout_ms;
        self
    }

    pub fn with_offset_syncs_topic(mut self, topic: impl Into<String>) -> Self {
        self.offset_syncs_topic = topic.into();
        self
    }

    pub fn with_replication_policy(mut self, policy: Arc<dyn ReplicationPolicy>) -> Self {
        self.replication_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let assignment = TaskAssignment::new("east", "west", vec![TopicPartition::new("orders", 0)]);
        assert_eq!(assignment.max_offset_lag, DEFAULT_MAX_OFFSET_LAG);
        assert_eq!(assignment.poll_timeout_ms, DEFAULT_POLL_TIMEOUT_MS);
        assert_eq!(assignment.offset_syncs_topic, "mm2-offset-syncs.west.internal");
    }
}
