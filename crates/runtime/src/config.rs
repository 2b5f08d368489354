use std::{num::NonZeroUsize, path::PathBuf, thread};

pub const PROGRAM_NAME: &str = "dirreader";
pub const PROGRAM_LOG_LEVEL: &str = "DIRREADER_LOG_LEVEL";
pub const PROGRAM_THREADS: &str = "DIRREADER_THREADS";

/// Worker count used when neither the environment nor the platform tells us.
const FALLBACK_THREADS: usize = 4;

/// Default root for the program to start scanning
pub fn default_scan_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Number of worker threads a scan should use.
///
/// `DIRREADER_THREADS` wins when it parses to a positive integer, otherwise
/// the available parallelism of the machine is used.
pub fn default_threads() -> usize {
    std::env::var(PROGRAM_THREADS)
        .ok()
        .and_then(|s| s.trim().parse::<NonZeroUsize>().ok())
        .or_else(|| thread::available_parallelism().ok())
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_THREADS)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
