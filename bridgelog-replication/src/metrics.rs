//! Concrete `MetricsSink` backed by the `metrics` crate facade, in the
//! `metrics::counter!`/`gauge!` call-site style common for tagging
//! per-partition replication metrics.

use bridgelog_core::traits::MetricsSink;
use bridgelog_core::TopicPartition;
use metrics::{counter, gauge, histogram};

/// Tags every emitted metric with the source topic-partition.
#[derive(Debug, Default)]
pub struct PrometheusMetricsSink {
    source_cluster_alias: String,
}

impl PrometheusMetricsSink {
    pub fn new(source_cluster_alias: impl Into<String>) -> Self {
        Self { source_cluster_alias: source_cluster_alias.into() }
    }
}

impl MetricsSink for PrometheusMetricsSink {
    fn record_age(&self, partition: &TopicPartition, age_millis: i64) {
        histogram!(
            "bridgelog_record_age_millis",
            "source" => self.source_cluster_alias.clone(),
            "topic" => partition.topic.clone(),
            "partition" => partition.partition.to_string(),
        )
        .record(age_millis.max(0) as f64);
    }

    fn record_bytes(&self, partition: &TopicPartition, bytes: usize) {
        counter!(
            "bridgelog_record_bytes_total",
            "source" => self.source_cluster_alias.clone(),
            "topic" => partition.topic.clone(),
            "partition" => partition.partition.to_string(),
        )
        .increment(bytes as u64);
    }

    fn count_record(&self, partition: &TopicPartition) {
        counter!(
            "bridgelog_records_total",
            "source" => self.source_cluster_alias.clone(),
            "topic" => partition.topic.clone(),
            "partition" => partition.partition.to_string(),
        )
        .increment(1);
    }

    fn replication_latency(&self, partition: &TopicPartition, latency_millis: i64) {
        histogram!(
            "bridgelog_replication_latency_millis",
            "source" => self.source_cluster_alias.clone(),
            "topic" => partition.topic.clone(),
            "partition" => partition.partition.to_string(),
        )
        .record(latency_millis.max(0) as f64);
    }

    fn close(&self) {
        gauge!(
            "bridgelog_task_active",
            "source" => self.source_cluster_alias.clone(),
        )
        .set(0.0);
    }
}
