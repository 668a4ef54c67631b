/// Scan diagnostics: atomic counters shared by every worker, snapshotted
/// into a [`ScanStats`] when the completion barrier resolves.
///
/// Unreadable directories degrade silently as far as results are concerned
/// (a locked folder must not abort a forensic sweep), but they are counted
/// here so callers and tests can observe how much of the tree was actually
/// covered.
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Counters mutated concurrently by the worker pool.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    /// Directories listed successfully.
    pub dirs_scanned: AtomicU64,
    /// Directories whose listing failed (permissions, vanished paths);
    /// each contributes an empty subtree and nothing else.
    pub unreadable_dirs: AtomicU64,
    /// Matches pushed to the result sink.
    pub matches_found: AtomicU64,
    /// Tasks currently past admission (held by a worker).
    pub active_tasks: AtomicUsize,
    /// High-water mark of `active_tasks` over the whole scan.
    pub peak_active_tasks: AtomicUsize,
    /// Tasks spawned but not yet completed, the root included. Reaches zero
    /// exactly once, at true completion; workers exit on observing that.
    pub outstanding: AtomicUsize,
}

impl Counters {
    /// Record a task passing admission and update the high-water mark.
    pub fn task_started(&self) {
        let now_active = self.active_tasks.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_active_tasks.fetch_max(now_active, Ordering::SeqCst);
    }

    /// Record a task finishing, no-op and abandoned paths included.
    /// The outstanding decrement is what ultimately releases the barrier.
    pub fn task_finished(&self) {
        self.active_tasks.fetch_sub(1, Ordering::SeqCst);
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Final statistics for one completed (or cancelled) scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanStats {
    /// Directories listed successfully.
    pub dirs_scanned: u64,
    /// Directories skipped because their listing failed.
    pub unreadable_dirs: u64,
    /// Matches streamed to the result sink.
    pub matches_found: u64,
    /// Peak number of simultaneously active directory tasks observed.
    /// Never exceeds the configured concurrency bound.
    pub peak_active_tasks: usize,
    /// Wall-clock time from `start_scan` to barrier release.
    pub duration: Duration,
    /// Whether the scan was abandoned via `ScanHandle::cancel`.
    pub cancelled: bool,
}

impl ScanStats {
    pub(crate) fn snapshot(counters: &Counters, duration: Duration, cancelled: bool) -> Self {
        Self {
            dirs_scanned: counters.dirs_scanned.load(Ordering::Relaxed),
            unreadable_dirs: counters.unreadable_dirs.load(Ordering::Relaxed),
            matches_found: counters.matches_found.load(Ordering::Relaxed),
            peak_active_tasks: counters.peak_active_tasks.load(Ordering::SeqCst),
            duration,
            cancelled,
        }
    }
}
