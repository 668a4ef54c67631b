/// Sweep orchestration: runs the production scan profiles and aggregates
/// labelled findings for report rendering.
///
/// A profile groups scan targets that share a label and an extension
/// allow-list (e.g. the three AppData roots). Targets within a profile are
/// scanned concurrently, each as its own bounded scan; every scan's sink is
/// drained on its own thread while the completion barrier is awaited, so a
/// bounded sink can never deadlock the sweep.
use crate::options::ScanOptions;
use crate::platform;
use crate::scanner;
use parking_lot::Mutex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Depth bound for the AppData roots. Profile caches nest deeply.
pub const APPDATA_SCAN_DEPTH: usize = 10;

/// Depth bound for the Windows directory. Two levels cover System32 and
/// friends without descending into the servicing stack.
pub const WINDOWS_SCAN_DEPTH: usize = 2;

/// Depth bound for the Program Files roots.
pub const PROGRAM_FILES_SCAN_DEPTH: usize = 3;

/// Depth bound for user folders (Downloads, OneDrive).
pub const USER_FOLDERS_SCAN_DEPTH: usize = 5;

/// Per-area depth bounds for the standard profiles, overridable from the
/// CLI configuration file.
#[derive(Debug, Clone)]
pub struct SweepDepths {
    pub appdata: usize,
    pub windows: usize,
    pub program_files: usize,
    pub user_folders: usize,
}

impl Default for SweepDepths {
    fn default() -> Self {
        Self {
            appdata: APPDATA_SCAN_DEPTH,
            windows: WINDOWS_SCAN_DEPTH,
            program_files: PROGRAM_FILES_SCAN_DEPTH,
            user_folders: USER_FOLDERS_SCAN_DEPTH,
        }
    }
}

/// One directory to scan within a profile, with its own depth bound.
#[derive(Debug, Clone)]
pub struct SweepTarget {
    pub root: PathBuf,
    pub max_depth: usize,
}

/// A labelled group of scan targets sharing an extension allow-list.
#[derive(Debug, Clone)]
pub struct SweepProfile {
    pub label: String,
    pub targets: Vec<SweepTarget>,
    /// `".ext"` allow-list applied to file matches; empty accepts any.
    pub extensions: Vec<String>,
}

/// Findings for one profile, sorted for deterministic rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSection {
    pub label: String,
    /// Matched paths, sorted. The scanner's sink is unordered; consumers
    /// sort after collection.
    pub findings: Vec<String>,
    /// Directories listed across all of the profile's targets.
    pub dirs_scanned: u64,
    /// Directories that could not be listed and contributed nothing.
    pub unreadable_dirs: u64,
}

/// Complete sweep output: one section per profile, in profile order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub sections: Vec<SweepSection>,
}

impl SweepReport {
    pub fn total_findings(&self) -> usize {
        self.sections.iter().map(|s| s.findings.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total_findings() == 0
    }
}

/// The production sweep: AppData, system folders, and Prefetch.
///
/// Roots resolve from the environment; targets whose variable is missing are
/// simply absent, and targets whose directory does not exist are skipped at
/// scan time. The profile list is therefore stable across hosts even when
/// individual targets are not.
pub fn standard_profiles(depths: &SweepDepths) -> Vec<SweepProfile> {
    let executable = vec![".exe".to_string(), ".dll".to_string()];

    let mut appdata = Vec::new();
    for root in [
        platform::roaming_app_data(),
        platform::local_app_data(),
        platform::local_low_app_data(),
    ]
    .into_iter()
    .flatten()
    {
        appdata.push(SweepTarget {
            root,
            max_depth: depths.appdata,
        });
    }

    let mut system = Vec::new();
    if let Some(root) = platform::windows_dir() {
        system.push(SweepTarget {
            root,
            max_depth: depths.windows,
        });
    }
    for root in [platform::program_files(), platform::program_files_x86()]
        .into_iter()
        .flatten()
    {
        system.push(SweepTarget {
            root,
            max_depth: depths.program_files,
        });
    }
    for root in [platform::downloads_dir(), platform::onedrive_dir()]
        .into_iter()
        .flatten()
    {
        system.push(SweepTarget {
            root,
            max_depth: depths.user_folders,
        });
    }

    let prefetch = platform::prefetch_dir()
        .map(|root| SweepTarget { root, max_depth: 0 })
        .into_iter()
        .collect();

    vec![
        SweepProfile {
            label: "AppData".to_string(),
            targets: appdata,
            extensions: executable.clone(),
        },
        SweepProfile {
            label: "System folders".to_string(),
            targets: system,
            extensions: executable,
        },
        SweepProfile {
            label: "Prefetch".to_string(),
            targets: prefetch,
            extensions: vec![".pf".to_string()],
        },
    ]
}

/// Scan every target of `profile` concurrently and merge the findings.
///
/// `base` supplies keywords, exclusions, and the concurrency bound; the
/// profile supplies extensions and per-target depths. Each target's sink is
/// drained into the shared collection on its own scoped thread.
pub fn run_profile(profile: &SweepProfile, base: &ScanOptions) -> SweepSection {
    let findings: Mutex<Vec<String>> = Mutex::new(Vec::new());
    let stats_acc: Mutex<Vec<scanner::ScanStats>> = Mutex::new(Vec::new());

    std::thread::scope(|scope| {
        for target in &profile.targets {
            if !target.root.is_dir() {
                debug!(
                    "sweep target {} does not exist, skipping",
                    target.root.display()
                );
                continue;
            }

            let options = Arc::new(
                base.clone()
                    .with_extensions(profile.extensions.iter().cloned())
                    .with_max_depth(target.max_depth),
            );
            let handle = match scanner::start_scan(&target.root, options) {
                Ok(handle) => handle,
                Err(err) => {
                    warn!("sweep target {} rejected: {err}", target.root.display());
                    continue;
                }
            };

            debug!(
                "sweep: scanning {} (depth {})",
                target.root.display(),
                target.max_depth
            );

            let findings = &findings;
            let stats_acc = &stats_acc;
            scope.spawn(move || {
                let (paths, stats) = handle.collect();
                findings.lock().extend(
                    paths
                        .into_iter()
                        .map(|path| path.to_string_lossy().into_owned()),
                );
                stats_acc.lock().push(stats);
            });
        }
    });

    let mut findings = findings.into_inner();
    findings.sort();

    let stats = stats_acc.into_inner();
    SweepSection {
        label: profile.label.clone(),
        findings,
        dirs_scanned: stats.iter().map(|s| s.dirs_scanned).sum(),
        unreadable_dirs: stats.iter().map(|s| s.unreadable_dirs).sum(),
    }
}

/// Run every profile in order and aggregate the sections.
pub fn run_sweep(profiles: &[SweepProfile], base: &ScanOptions) -> SweepReport {
    let sections = profiles
        .iter()
        .map(|profile| {
            let section = run_profile(profile, base);
            info!(
                "{}: {} findings across {} directories ({} unreadable)",
                section.label,
                section.findings.len(),
                section.dirs_scanned,
                section.unreadable_dirs
            );
            section
        })
        .collect();
    SweepReport { sections }
}
