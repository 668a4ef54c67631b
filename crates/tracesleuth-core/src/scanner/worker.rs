/// Worker loop and per-directory task processing.
///
/// Each worker repeatedly pulls one `ScanTask` from the shared queue,
/// classifies the directory's entries, streams matches to the result sink,
/// and enqueues one child task per non-excluded subdirectory. Task-local
/// state (the entry iterator, child paths) is private to the worker; the
/// only shared mutations are the counters and the two channels.
use crate::matcher::KeywordMatcher;
use crate::options::ScanOptions;
use crate::scanner::stats::Counters;
use crate::scanner::ScanTask;
use crossbeam_channel::{Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How long an idle worker waits for new work before re-checking the
/// outstanding-task counter for termination.
const IDLE_POLL: Duration = Duration::from_millis(25);

/// Back-off interval for pushes into a saturated result sink, between which
/// the cancellation flag is re-checked so a stalled consumer cannot wedge a
/// cancelled scan.
const EMIT_RETRY: Duration = Duration::from_millis(50);

/// Everything one worker thread needs, cloned once per worker at spawn time.
pub(crate) struct WorkerContext {
    pub work_rx: Receiver<ScanTask>,
    pub work_tx: Sender<ScanTask>,
    pub results_tx: Sender<PathBuf>,
    pub options: Arc<ScanOptions>,
    pub matcher: Arc<KeywordMatcher>,
    pub counters: Arc<Counters>,
    pub cancel_flag: Arc<AtomicBool>,
}

/// Worker entry point.
///
/// Exits when the outstanding-task counter reaches zero (true completion:
/// no task is active and none is queued, since the counter is incremented
/// before a child is ever enqueued) or when the work channel disconnects.
pub(crate) fn run(ctx: WorkerContext) {
    loop {
        match ctx.work_rx.recv_timeout(IDLE_POLL) {
            Ok(task) => {
                ctx.counters.task_started();
                process_task(&ctx, &task);
                ctx.counters.task_finished();
            }
            Err(RecvTimeoutError::Timeout) => {
                if ctx.counters.outstanding.load(Ordering::SeqCst) == 0 {
                    return;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

/// Process one directory at one depth.
///
/// Failure semantics: an unlistable directory (permission denied, vanished,
/// not a directory) counts as unreadable and contributes an empty subtree.
/// Individual entries that fail to stat are skipped. Nothing here is ever
/// retried or surfaced as an error.
fn process_task(ctx: &WorkerContext, task: &ScanTask) {
    // Abandoned tasks still count as finished in the caller's loop, so a
    // cancelled scan drains its queue quickly and the barrier cannot hang.
    if ctx.cancel_flag.load(Ordering::Relaxed) {
        return;
    }

    // Children past the depth bound are never enqueued; the guard makes an
    // out-of-bound task a completed no-op either way.
    if task.depth > ctx.options.max_depth() {
        return;
    }

    let entries = match fs::read_dir(&task.path) {
        Ok(entries) => entries,
        Err(err) => {
            ctx.counters.unreadable_dirs.fetch_add(1, Ordering::Relaxed);
            debug!(
                "skipping unreadable directory {}: {err}",
                task.path.display()
            );
            return;
        }
    };
    ctx.counters.dirs_scanned.fetch_add(1, Ordering::Relaxed);

    // Second cancellation point, between the listing call and any
    // classification or child spawning.
    if ctx.cancel_flag.load(Ordering::Relaxed) {
        return;
    }

    for entry in entries {
        // Entry-level races (deleted between listing and stat) lose silently.
        let Ok(entry) = entry else { continue };

        let name_os = entry.file_name();
        let name = name_os.to_string_lossy();
        // Symlinks report their own type here, so a link to a directory is
        // treated as a plain file: eligible to match, never recursed into.
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);

        // Exclusion wins over everything: no keyword check, no recursion,
        // no report, whatever the directory contains.
        if is_dir && ctx.options.is_excluded_dir(&name) {
            continue;
        }

        if ctx.matcher.matches_entry(&name, is_dir) {
            emit(ctx, entry.path());
        }

        // A matching directory is still recursed into; only exclusion and
        // the depth bound prune traversal.
        if is_dir && task.depth < ctx.options.max_depth() {
            spawn_child(ctx, entry.path(), task.depth + 1);
        }
    }
}

/// Push one match to the result sink.
///
/// Uses a bounded send with retries rather than a blocking send: a cancelled
/// scan stops waiting on a saturated channel, and a dropped receiver quietly
/// discards the remaining matches instead of poisoning the worker.
fn emit(ctx: &WorkerContext, path: PathBuf) {
    let mut item = path;
    loop {
        match ctx.results_tx.send_timeout(item, EMIT_RETRY) {
            Ok(()) => {
                ctx.counters.matches_found.fetch_add(1, Ordering::Relaxed);
                return;
            }
            Err(SendTimeoutError::Timeout(back)) => {
                if ctx.cancel_flag.load(Ordering::Relaxed) {
                    return;
                }
                item = back;
            }
            Err(SendTimeoutError::Disconnected(_)) => return,
        }
    }
}

/// Register a child task against the outstanding counter, then enqueue it.
///
/// The increment happens before the send so the counter can never be
/// observed at zero while a task is still pending admission; the failure
/// path undoes it, since a disconnected queue means the scan is tearing
/// down and the child will never run.
fn spawn_child(ctx: &WorkerContext, path: PathBuf, depth: usize) {
    ctx.counters.outstanding.fetch_add(1, Ordering::SeqCst);
    if ctx.work_tx.send(ScanTask { path, depth }).is_err() {
        ctx.counters.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}
