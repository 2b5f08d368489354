use std::{
    path::{Path, PathBuf},
    sync::Arc,
    thread::{self, ScopedJoinHandle},
    time::Instant,
};

use crossbeam::channel;
use dirreader_runtime::default_threads;
use log::debug;

use crate::{
    digest::{HashAlgorithm, HashFactory},
    error::{AggregatedError, ScanError},
    filter::SuffixFilter,
    record::FileRecord,
    source::{LocalFs, Source},
    walker::{WalkContext, walk_tree},
};

/// Configures and runs a scan.
///
/// ```no_run
/// use dirreader_fs::{HashAlgorithm, Scanner};
///
/// let records = Scanner::new("/srv/data")
///     .suffixes([".log"])
///     .include(false)
///     .algorithm(HashAlgorithm::Sha256)
///     .run()?;
/// # Ok::<(), dirreader_fs::AggregatedError>(())
/// ```
pub struct Scanner {
    root: PathBuf,
    hash: Option<HashFactory>,
    suffixes: Vec<String>,
    include: bool,
    threads: usize,
    source: Arc<dyn Source>,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Scanner {
            root: root.into(),
            hash: None,
            suffixes: Vec::new(),
            include: false,
            threads: default_threads(),
            source: Arc::new(LocalFs),
        }
    }

    pub fn hash(mut self, factory: HashFactory) -> Self {
        self.hash = Some(factory);
        self
    }

    pub fn algorithm(self, alg: HashAlgorithm) -> Self {
        self.hash(alg.factory())
    }

    pub fn suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// `true` keeps only files matching a suffix, `false` keeps only the rest.
    /// Ignored while no suffixes are set.
    pub fn include(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    /// Worker thread count; clamped to at least one.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn source(mut self, source: Arc<dyn Source>) -> Self {
        self.source = source;
        self
    }

    /// Walk the whole tree and return every record, or every error.
    ///
    /// Any single failure anywhere discards all records.
    pub fn run(self) -> Result<Vec<FileRecord>, AggregatedError> {
        let Scanner {
            root,
            hash,
            suffixes,
            include,
            threads,
            source,
        } = self;

        let ctx = WalkContext {
            source: source.as_ref(),
            filter: SuffixFilter::new(suffixes, include),
            hash,
        };

        let started = Instant::now();
        let (records, errors) = collect(&root, &ctx, threads);

        debug!(
            "[scan] {:?}: {} records, {} errors in {:.2}ms",
            root,
            records.len(),
            errors.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );

        match errors.into_option() {
            Some(err) => Err(err),
            None => Ok(records),
        }
    }
}

/// Run the walk with one collector thread per stream.
///
/// Each collector owns its accumulator outright; producers only send.
fn collect(
    root: &Path,
    ctx: &WalkContext<'_>,
    threads: usize,
) -> (Vec<FileRecord>, AggregatedError) {
    let (record_tx, record_rx) = channel::bounded::<FileRecord>(0);
    let (error_tx, error_rx) = channel::bounded::<ScanError>(0);

    thread::scope(|s| {
        let records = s.spawn(move || record_rx.iter().collect::<Vec<_>>());
        let errors = s.spawn(move || {
            error_rx
                .iter()
                .fold(AggregatedError::default(), |mut acc, err| {
                    acc.push(err);
                    acc
                })
        });

        // Consumes both senders; once it returns the streams are closed.
        walk_tree(root, ctx, record_tx, error_tx, threads);

        (join(records), join(errors))
    })
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Scan `root` on the local filesystem with the default thread count.
pub fn scan(
    root: &Path,
    hash: Option<HashFactory>,
    suffixes: &[String],
    include: bool,
) -> Result<Vec<FileRecord>, AggregatedError> {
    scan_with(Arc::new(LocalFs), root, hash, suffixes, include)
}

/// [`scan`] against an arbitrary [`Source`].
pub fn scan_with(
    source: Arc<dyn Source>,
    root: &Path,
    hash: Option<HashFactory>,
    suffixes: &[String],
    include: bool,
) -> Result<Vec<FileRecord>, AggregatedError> {
    let mut scanner = Scanner::new(root)
        .suffixes(suffixes.iter().cloned())
        .include(include)
        .source(source);
    scanner.hash = hash;
    scanner.run()
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
