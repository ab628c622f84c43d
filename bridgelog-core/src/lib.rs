//! Bridgelog Core - shared types and trait contracts for cross-cluster
//! log replication.
//!
//! This crate holds no broker client and no executor; it defines the
//! data model, the offset-sync wire codec, the naming policy, and the
//! trait seams a host implements to drive a `bridgelog-replication` task.

pub mod error;
pub mod offset_storage;
pub mod offset_sync;
pub mod policy;
pub mod record;
pub mod task_assignment;
pub mod topic_partition;
pub mod traits;

pub use error::{BridgeError, Result};
pub use offset_sync::OffsetSync;
pub use policy::{DefaultReplicationPolicy, ReplicationPolicy};
pub use record::{ForwardedRecord, RecordHeader, RecordMetadata, SourceRecord};
pub use task_assignment::TaskAssignment;
pub use topic_partition::TopicPartition;
pub use traits::{MetricsSink, OffsetStorage, OffsetSyncProducer, SourceConsumer};

/// Re-exports the common set a host or a `bridgelog-replication` consumer
/// typically needs.
pub mod prelude {
    pub use crate::error::{BridgeError, Result};
    pub use crate::offset_sync::OffsetSync;
    pub use crate::policy::{DefaultReplicationPolicy, ReplicationPolicy};
    pub use crate::record::{ForwardedRecord, RecordHeader, RecordMetadata, SourceRecord};
    pub use crate::task_assignment::TaskAssignment;
    pub use crate::topic_partition::TopicPartition;
    pub use crate::traits::{MetricsSink, OffsetStorage, OffsetSyncProducer, SourceConsumer};
}
