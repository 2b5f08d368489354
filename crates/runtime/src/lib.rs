mod config;
pub mod logging;

pub use config::{
    PROGRAM_LOG_LEVEL, PROGRAM_NAME, PROGRAM_THREADS, default_scan_root, default_threads,
};

pub use logging::init;
