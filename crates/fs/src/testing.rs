//! Test doubles for [`Source`].

use std::{
    collections::HashSet,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::source::{DirItems, LocalFs, Source};

/// Local filesystem with failures injected for chosen paths.
#[derive(Default)]
pub struct FaultySource {
    fail_open: HashSet<PathBuf>,
    fail_stream: HashSet<PathBuf>,
    fail_listing: HashSet<PathBuf>,
    opened: Mutex<Vec<PathBuf>>,
}

impl FaultySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening `path` (file or directory) fails.
    pub fn fail_open(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_open.insert(path.into());
        self
    }

    /// Reading the file at `path` fails after the first few bytes.
    pub fn fail_stream(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_stream.insert(path.into());
        self
    }

    /// Listing the directory at `path` fails after it was opened.
    pub fn fail_listing(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_listing.insert(path.into());
        self
    }

    /// Files opened so far, including attempts that were made to fail.
    pub fn opened_files(&self) -> Vec<PathBuf> {
        self.opened.lock().expect("opened lock").clone()
    }
}

fn injected(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, format!("injected {what} failure"))
}

impl Source for FaultySource {
    fn open_dir(&self, path: &Path) -> io::Result<DirItems> {
        if self.fail_open.contains(path) {
            return Err(injected("open"));
        }
        if self.fail_listing.contains(path) {
            let items = LocalFs.open_dir(path)?;
            return Ok(Box::new(
                items.chain(std::iter::once(Err(injected("listing")))),
            ));
        }
        LocalFs.open_dir(path)
    }

    fn open_file(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        self.opened
            .lock()
            .expect("opened lock")
            .push(path.to_path_buf());

        if self.fail_open.contains(path) {
            return Err(injected("open"));
        }
        let file = LocalFs.open_file(path)?;
        if self.fail_stream.contains(path) {
            return Ok(Box::new(BrokenReader { inner: file, served: 0 }));
        }
        Ok(file)
    }
}

/// Serves a handful of bytes, then errors.
struct BrokenReader {
    inner: Box<dyn Read + Send>,
    served: usize,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served >= 4 {
            return Err(injected("stream"));
        }
        let want = buf.len().min(4 - self.served);
        let n = self.inner.read(&mut buf[..want])?;
        self.served += n;
        if n == 0 {
            return Err(injected("stream"));
        }
        Ok(n)
    }
}
