//! Concurrent directory inventory: every file under a root, optionally
//! filtered by name suffix and hashed, or every error the walk ran into.

mod config;
mod digest;
mod error;
mod filter;
mod record;
mod scan;
mod source;
mod walker;

#[cfg(test)]
mod testing;

pub use digest::{HashAlgorithm, HashFactory, HashState, UnknownAlgorithm, compute_digest, to_hex};
pub use error::{AggregatedError, ErrorKind, ScanError};
pub use filter::{SuffixFilter, matches};
pub use record::{FileMeta, FileRecord};
pub use scan::{Scanner, scan, scan_with};
pub use source::{DirItem, DirItems, LocalFs, Source};
