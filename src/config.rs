//! Host-facing configuration for a replication flow: a serde-friendly
//! struct with a concrete `Default` carrying the documented defaults, but
//! deliberately stopping there -- file/CLI loading is the orchestrator's
//! concern, not this crate's.

use serde::{Deserialize, Serialize};

use bridgelog_core::task_assignment::{DEFAULT_MAX_OFFSET_LAG, DEFAULT_POLL_TIMEOUT_MS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicationFlowConfig {
    pub source_cluster_alias: String,
    pub target_cluster_alias: String,
    pub topics: Vec<String>,
    pub partitions_per_topic: u32,
    pub offset_lag: OffsetLagConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetLagConfig {
    /// `offset.lag.max` -- `PartitionState.maxOffsetLag`.
    pub max: i64,
    pub poll_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub topic_separator: String,
}

impl Default for ReplicationFlowConfig {
    fn default() -> Self {
        Self {
            source_cluster_alias: "source".to_string(),
            target_cluster_alias: "target".to_string(),
            topics: Vec::new(),
            partitions_per_topic: 1,
            offset_lag: OffsetLagConfig {
                max: DEFAULT_MAX_OFFSET_LAG,
                poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            },
            policy: PolicyConfig { topic_separator: ".".to_string() },
        }
    }
}

impl ReplicationFlowConfig {
    pub fn offset_syncs_topic(&self) -> String {
        format!("mm2-offset-syncs.{}.internal", self.target_cluster_alias)
    }
}
