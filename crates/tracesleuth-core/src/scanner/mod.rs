/// Scanner engine: bounded-concurrency recursive directory traversal.
///
/// # Design
///
/// The traversal is a fixed worker pool, not a task-per-directory spawn:
///
/// - A single unbounded queue carries `ScanTask { path, depth }` units of
///   work. The root directory is the first task; every non-excluded
///   subdirectory discovered becomes another.
/// - Exactly `concurrency` worker threads pull from the queue, so the number
///   of simultaneously active directory tasks can never exceed the bound.
///   The bound is scan-global and structural: it holds regardless of tree
///   width or depth, protecting file-handle budgets on pathological trees.
/// - An outstanding-task counter is incremented before a child is enqueued
///   and decremented when a task finishes (no-op and abandoned paths
///   included). Zero outstanding means true completion, and is the signal
///   idle workers exit on.
/// - Matches stream through a bounded crossbeam channel the moment they are
///   found; nothing is buffered inside the engine. Callers must drain
///   `results_rx` while awaiting [`ScanHandle::wait`], or use
///   [`ScanHandle::collect`] which encodes that contract.
pub mod stats;
mod worker;

use crate::matcher::KeywordMatcher;
use crate::options::{OptionsError, ScanOptions};
use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::debug;

pub use stats::ScanStats;
use stats::Counters;

/// Maximum matches that may queue in the result sink before senders back off.
///
/// Matches are rare relative to entries visited, so this is generous
/// headroom; if a consumer stops draining entirely, the scan stalls (and
/// stays cancellable) rather than buffering unbounded heap.
pub const RESULT_CHANNEL_CAPACITY: usize = 4_096;

/// Unit of work: process one directory at one depth (depth 0 = scan root).
///
/// Created for the root and for every non-excluded subdirectory within the
/// depth bound; consumed and discarded once its listing is processed.
#[derive(Debug, Clone)]
pub(crate) struct ScanTask {
    pub path: PathBuf,
    pub depth: usize,
}

/// Handle to a running scan: the streaming result sink, cancellation, and
/// the completion barrier.
///
/// Dropping the handle without waiting is safe: the disconnected sink makes
/// the remaining workers finish quickly and their threads detach.
pub struct ScanHandle {
    /// Receiver side of the result sink. Matched paths arrive in no
    /// particular order as they are found; sort after collection if a
    /// deterministic view is needed.
    pub results_rx: Receiver<PathBuf>,
    cancel_flag: Arc<AtomicBool>,
    counters: Arc<Counters>,
    workers: Vec<thread::JoinHandle<()>>,
    started: Instant,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible. In-flight directory
    /// listings finish; queued tasks drain as no-ops.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Completion barrier: blocks until every task spawned from the root,
    /// directly or transitively, has finished, then snapshots diagnostics.
    ///
    /// Callers must drain `results_rx` concurrently with this call (the
    /// sink is bounded), or use [`collect`](Self::collect) instead.
    pub fn wait(mut self) -> ScanStats {
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
        ScanStats::snapshot(
            &self.counters,
            self.started.elapsed(),
            self.cancel_flag.load(Ordering::Relaxed),
        )
    }

    /// Drain the result sink to exhaustion, then wait for the barrier.
    ///
    /// The returned set is complete and unordered; two scans of an unchanged
    /// tree with identical options yield the same set.
    pub fn collect(self) -> (Vec<PathBuf>, ScanStats) {
        let results_rx = self.results_rx.clone();
        let mut found = Vec::new();
        // Ends when every worker has exited and dropped its sender.
        for path in results_rx.iter() {
            found.push(path);
        }
        let stats = self.wait();
        (found, stats)
    }
}

/// Start a scan of `root` on a pool of background threads.
///
/// Malformed options are rejected here, synchronously, before any thread is
/// spawned. A root that cannot be listed is not an error: the scan completes
/// with zero results and `unreadable_dirs == 1`.
pub fn start_scan(
    root: impl Into<PathBuf>,
    options: Arc<ScanOptions>,
) -> Result<ScanHandle, OptionsError> {
    options.validate()?;

    let root = root.into();
    let matcher = Arc::new(KeywordMatcher::from_options(&options));
    let counters = Arc::new(Counters::default());
    let cancel_flag = Arc::new(AtomicBool::new(false));

    let (results_tx, results_rx) = crossbeam_channel::bounded::<PathBuf>(RESULT_CHANNEL_CAPACITY);
    let (work_tx, work_rx) = crossbeam_channel::unbounded::<ScanTask>();

    // Seed the queue with the root task. The counter is set before the send
    // so no worker can observe a momentarily-empty scan and exit early.
    counters.outstanding.store(1, Ordering::SeqCst);
    let _ = work_tx.send(ScanTask {
        path: root.clone(),
        depth: 0,
    });

    debug!(
        "starting scan of {} ({} workers, depth bound {})",
        root.display(),
        options.concurrency(),
        options.max_depth()
    );

    let workers = (0..options.concurrency())
        .map(|i| {
            let ctx = worker::WorkerContext {
                work_rx: work_rx.clone(),
                work_tx: work_tx.clone(),
                results_tx: results_tx.clone(),
                options: Arc::clone(&options),
                matcher: Arc::clone(&matcher),
                counters: Arc::clone(&counters),
                cancel_flag: Arc::clone(&cancel_flag),
            };
            thread::Builder::new()
                .name(format!("tracesleuth-scan-{i}"))
                .spawn(move || worker::run(ctx))
                .expect("failed to spawn scanner thread")
        })
        .collect();

    // The workers hold the only remaining senders; once they exit, the
    // result sink disconnects and drain loops terminate.
    drop(work_tx);
    drop(results_tx);

    Ok(ScanHandle {
        results_rx,
        cancel_flag,
        counters,
        workers,
        started: Instant::now(),
    })
}
