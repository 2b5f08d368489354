use std::time::Duration;

/// Buffer size used when streaming file contents into a hash state.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// How long an idle worker waits for a task before re-checking whether the
/// walk has drained.
pub const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(50);
