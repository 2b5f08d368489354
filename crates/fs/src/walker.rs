use std::{
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use log::{debug, trace, warn};

use crate::{
    config::WORKER_POLL_INTERVAL,
    digest::{HashFactory, compute_digest},
    error::ScanError,
    filter::SuffixFilter,
    record::{FileMeta, FileRecord},
    source::{DirItem, Source},
};

/// Everything a worker needs to know about the scan it is part of.
pub(crate) struct WalkContext<'a> {
    pub source: &'a dyn Source,
    pub filter: SuffixFilter,
    pub hash: Option<HashFactory>,
}

/// Unit of work pulled from the shared queue.
#[derive(Debug)]
pub(crate) enum Task {
    Dir {
        abs: PathBuf,
        rel: PathBuf,
    },
    File {
        abs: PathBuf,
        rel: PathBuf,
        meta: FileMeta,
    },
}

/// Producer ends shared by every worker.
#[derive(Clone)]
pub(crate) struct Outputs {
    pub work: Sender<Task>,
    pub records: Sender<FileRecord>,
    pub errors: Sender<ScanError>,
}

impl Outputs {
    fn report(&self, err: ScanError) {
        warn!("[walk] {err}");
        // The collector outlives every worker, so this cannot fail mid-scan.
        let _ = self.errors.send(err);
    }

    /// Queue a task, counting it as pending before it becomes visible.
    fn schedule(&self, task: Task, pending: &AtomicUsize) {
        pending.fetch_add(1, Ordering::AcqRel);
        let _ = self.work.send(task);
    }
}

/// Walk the tree under `root` on `num_threads` workers.
///
/// Directories and admitted files become tasks on a shared queue; a pending
/// counter tracks queued plus running tasks and the walk ends when it drops
/// to zero. Records and errors go to the given senders.
pub(crate) fn walk_tree(
    root: &Path,
    ctx: &WalkContext<'_>,
    records: Sender<FileRecord>,
    errors: Sender<ScanError>,
    num_threads: usize,
) {
    let (work_tx, work_rx) = channel::unbounded::<Task>();
    let outputs = Outputs {
        work: work_tx,
        records,
        errors,
    };

    let pending = AtomicUsize::new(0);
    outputs.schedule(
        Task::Dir {
            abs: root.to_path_buf(),
            rel: PathBuf::new(),
        },
        &pending,
    );

    debug!(
        "[walk_tree] starting at {:?} with {} threads",
        root, num_threads
    );

    thread::scope(|s| {
        for _ in 0..num_threads.max(1) {
            let work_rx = work_rx.clone();
            let outputs = outputs.clone();
            let pending = &pending;

            s.spawn(move || worker_loop(work_rx, outputs, ctx, pending));
        }
    });

    debug!("[walk_tree] finished {:?}", root);
}

/// Counts one running task against `pending`.
///
/// Dropping it without `release` (a panicking task) still decrements, so the
/// remaining workers drain and the panic reaches the caller.
struct TaskClaim<'a> {
    pending: &'a AtomicUsize,
}

impl TaskClaim<'_> {
    /// Returns true when this was the last pending task.
    fn release(self) -> bool {
        let last = self.pending.fetch_sub(1, Ordering::AcqRel) == 1;
        std::mem::forget(self);
        last
    }
}

impl Drop for TaskClaim<'_> {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::AcqRel);
    }
}

fn worker_loop(
    work_rx: Receiver<Task>,
    outputs: Outputs,
    ctx: &WalkContext<'_>,
    pending: &AtomicUsize,
) {
    loop {
        match work_rx.recv_timeout(WORKER_POLL_INTERVAL) {
            Ok(task) => {
                let claim = TaskClaim { pending };
                run_task(task, ctx, &outputs, pending);

                if claim.release() {
                    // That was the last outstanding task anywhere.
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if pending.load(Ordering::Acquire) == 0 {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn run_task(task: Task, ctx: &WalkContext<'_>, outputs: &Outputs, pending: &AtomicUsize) {
    match task {
        Task::Dir { abs, rel } => walk_dir(&abs, &rel, ctx, outputs, pending),
        Task::File { abs, rel, meta } => process_file(abs, rel, meta, ctx, outputs),
    }
}

/// List one directory and queue its children.
///
/// Subdirectories are always queued; files only when the filter admits them.
fn walk_dir(
    abs: &Path,
    rel: &Path,
    ctx: &WalkContext<'_>,
    outputs: &Outputs,
    pending: &AtomicUsize,
) {
    let items = match ctx.source.open_dir(abs) {
        Ok(items) => items,
        Err(e) => {
            outputs.report(ScanError::open(abs, e));
            return;
        }
    };

    let items = match items.collect::<io::Result<Vec<DirItem>>>() {
        Ok(items) => items,
        Err(e) => {
            outputs.report(ScanError::read(abs, e));
            return;
        }
    };

    for DirItem { name, meta } in items {
        let child = abs.join(&name);

        if meta.is_dir {
            trace!("[walk] queue dir {:?}", child);
            outputs.schedule(
                Task::Dir {
                    abs: child,
                    rel: rel.join(&name),
                },
                pending,
            );
            continue;
        }

        if !ctx.filter.admits(&name) {
            continue;
        }

        trace!("[walk] queue file {:?}", child);
        outputs.schedule(
            Task::File {
                abs: child,
                rel: rel.to_path_buf(),
                meta,
            },
            pending,
        );
    }
}

/// Build the record for one file, hashing it when requested.
///
/// A digest failure is reported but the record is still emitted without a
/// digest.
fn process_file(
    abs: PathBuf,
    rel: PathBuf,
    meta: FileMeta,
    ctx: &WalkContext<'_>,
    outputs: &Outputs,
) {
    let digest = ctx
        .hash
        .as_ref()
        .and_then(|factory| match compute_digest(ctx.source, &abs, factory) {
            Ok(hex) => Some(hex),
            Err(e) => {
                outputs.report(e);
                None
            }
        });

    let _ = outputs.records.send(FileRecord {
        meta,
        absolute_path: abs,
        relative_path: rel,
        digest,
    });
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
