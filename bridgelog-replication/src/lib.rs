//! Bridgelog Replication - the per-partition decision rule and the
//! host-driven pump that together replicate records from a source cluster
//! to a target cluster while keeping the offset-syncs topic current.

pub mod metrics;
pub mod partition_state;
pub mod task;

pub use metrics::PrometheusMetricsSink;
pub use partition_state::PartitionState;
pub use task::{ReplicationTask, TaskState, MAX_OUTSTANDING_OFFSET_SYNCS};
