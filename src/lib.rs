//! Bridgelog - cross-cluster Kafka replication data-plane.
//!
//! Bridgelog tracks offset translation between a source and a target
//! cluster and drives a host-owned replication pump. It provides:
//!
//! - A compact, compaction-friendly offset-sync wire format
//! - A four-rule decision policy bounding translation error
//! - A host-driven task pump with bounded offset-sync backpressure
//! - Pluggable topic-naming and internal-topic classification

pub mod config;
pub mod telemetry;

pub use bridgelog_core as core;
pub use bridgelog_offsetstore as offsetstore;
pub use bridgelog_replication as replication;

pub use config::ReplicationFlowConfig;
pub use telemetry::init_tracing;

/// Re-exports the common set needed to wire up a replication flow.
pub mod prelude {
    pub use crate::config::ReplicationFlowConfig;
    pub use crate::core::{
        BridgeError, DefaultReplicationPolicy, ForwardedRecord, MetricsSink, OffsetStorage,
        OffsetSync, OffsetSyncProducer, RecordMetadata, ReplicationPolicy, Result, SourceConsumer,
        SourceRecord, TaskAssignment, TopicPartition,
    };
    pub use crate::offsetstore::OffsetSyncStore;
    pub use crate::replication::{PrometheusMetricsSink, ReplicationTask, TaskState};
}
