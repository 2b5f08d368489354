use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Coarse classification of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A directory or file could not be opened.
    Open,
    /// Directory entries or file bytes could not be read.
    Read,
}

/// A single failure observed somewhere in the scanned tree.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("open {}: {}", .path.display(), .source)]
    Open { path: PathBuf, source: io::Error },

    #[error("read {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },
}

impl ScanError {
    pub fn open(path: &Path, source: io::Error) -> Self {
        ScanError::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        ScanError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::Open { .. } => ErrorKind::Open,
            ScanError::Read { .. } => ErrorKind::Read,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ScanError::Open { path, .. } | ScanError::Read { path, .. } => path,
        }
    }
}

/// Every error a scan produced, in the order the collector received them.
///
/// A scan only ever returns this when at least one error occurred.
#[derive(Debug, Default)]
pub struct AggregatedError {
    errors: Vec<ScanError>,
}

impl AggregatedError {
    pub(crate) fn push(&mut self, err: ScanError) {
        self.errors.push(err);
    }

    /// `None` when nothing was collected.
    pub(crate) fn into_option(self) -> Option<Self> {
        (!self.errors.is_empty()).then_some(self)
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ScanError> {
        self.errors
    }
}

impl fmt::Display for AggregatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregatedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
