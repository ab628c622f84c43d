//! Per-partition "should we emit an offset sync now?" decision, held only
//! inside a running task. Narrowed from an offset-bookkeeping `SyncManager`
//! that tracked many remote positions at once down to a single-partition,
//! allocation-free decision rule.

/// Tracks one source `TopicPartition`'s replication progress and decides
/// when a fresh `OffsetSync` needs publishing.
#[derive(Debug, Clone)]
pub struct PartitionState {
    previous_upstream: i64,
    previous_downstream: i64,
    last_sync_upstream: i64,
    last_sync_downstream: i64,
    max_offset_lag: i64,
}

impl PartitionState {
    pub fn new(max_offset_lag: i64) -> Self {
        Self {
            previous_upstream: -1,
            previous_downstream: -1,
            last_sync_upstream: -1,
            last_sync_downstream: -1,
            max_offset_lag,
        }
    }

    pub fn previous_upstream(&self) -> i64 {
        self.previous_upstream
    }

    pub fn previous_downstream(&self) -> i64 {
        self.previous_downstream
    }

    pub fn last_sync_upstream(&self) -> i64 {
        self.last_sync_upstream
    }

    pub fn last_sync_downstream(&self) -> i64 {
        self.last_sync_downstream
    }

    /// Evaluate the four-rule decision order against a newly observed
    /// `(upstream, downstream)` pair. Always advances `previous*`; advances
    /// `lastSync*` only when it returns `true`.
    pub fn update(&mut self, upstream: i64, downstream: i64) -> bool {
        let emit = if self.last_sync_downstream == -1 {
            true
        } else if self.has_drifted(upstream, downstream) {
            true
        } else if upstream - self.previous_upstream != 1 {
            true
        } else {
            downstream < self.previous_downstream
        };

        self.previous_upstream = upstream;
        self.previous_downstream = downstream;
        if emit {
            self.last_sync_upstream = upstream;
            self.last_sync_downstream = downstream;
        }
        emit
    }

    fn has_drifted(&self, upstream: i64, downstream: i64) -> bool {
        let target = self.last_sync_downstream + (upstream - self.last_sync_upstream);
        downstream - target >= self.max_offset_lag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sync_always_emits() {
        let mut state = PartitionState::new(100);
        assert!(state.update(0, 1000));
        assert_eq!(state.last_sync_upstream(), 0);
        assert_eq!(state.last_sync_downstream(), 1000);
    }

    #[test]
    fn steady_linear_replication_emits_only_once() {
        let mut state = PartitionState::new(100);
        assert!(state.update(0, 1000));
        for u in 1..=50 {
            assert!(!state.update(u, 1000 + u));
        }
        assert_eq!(state.last_sync_upstream(), 0);
    }

    #[test]
    fn drift_beyond_lag_triggers_emit() {
        let mut state = PartitionState::new(100);
        assert!(state.update(0, 1000));
        assert!(state.update(1, 1101));
    }

    #[test]
    fn upstream_gap_triggers_emit() {
        let mut state = PartitionState::new(100);
        assert!(state.update(0, 1000));
        assert!(state.update(2, 1002));
    }

    #[test]
    fn downstream_regression_triggers_emit() {
        let mut state = PartitionState::new(100);
        assert!(state.update(0, 1000));
        assert!(state.update(1, 1001));
        assert!(state.update(2, 999));
    }

    #[test]
    fn previous_fields_advance_even_without_emit() {
        let mut state = PartitionState::new(100);
        state.update(0, 1000);
        state.update(1, 1001);
        assert_eq!(state.previous_upstream(), 1);
        assert_eq!(state.previous_downstream(), 1001);
    }

    proptest::proptest! {
        #[test]
        fn linear_sequence_within_lag_emits_exactly_once(
            max_offset_lag in 1i64..1000,
            steps in 1usize..200,
        ) {
            let mut state = PartitionState::new(max_offset_lag);
            let mut emit_count = 0;
            let (mut u, mut d) = (0i64, 1000i64);
            for _ in 0..steps {
                if state.update(u, d) {
                    emit_count += 1;
                }
                u += 1;
                d += 1;
            }
            proptest::prop_assert_eq!(emit_count, 1);
        }
    }
}
