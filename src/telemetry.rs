//! Tracing setup for a host process embedding this crate. This crate has
//! no binary of its own, so a host calls this once at startup.

/// Installs a `tracing_subscriber::fmt` subscriber with thread IDs enabled,
/// which matters for a task pump where `poll`, `commit_record`, and the
/// offset-sync send callback can all log from different threads.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();
}
