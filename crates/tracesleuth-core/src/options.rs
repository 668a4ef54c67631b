/// Scan configuration: keyword list, extension allow-list, directory
/// exclusions, and the depth / concurrency bounds.
///
/// A `ScanOptions` is built once per scan and shared read-only with every
/// worker via `Arc`, so nothing here needs synchronisation.
use compact_str::CompactString;
use std::collections::HashSet;
use thiserror::Error;

/// Default scan-global concurrency bound: the maximum number of directory
/// tasks that may be simultaneously active during one scan.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Default recursion depth bound. Depth 0 is the scan root itself.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Filename keywords associated with known cheat software.
///
/// Matched case-insensitively as substrings of entry basenames. The list is
/// deliberately broad; the report layer leaves triage to the operator.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "undead", "melony", "fecurity", "ancient", "hack", "cheat", "inject",
    "bypass", "overlay", "esp", "speedhack", "hwid", "medusa", "mason",
    "mas", "smg", "midnight", "fatality", "memesense", "xnor", "loader",
];

/// Directory basenames that are never traversed or reported.
///
/// Compared case-insensitively, directories only. These are either huge
/// system areas with no forensic value for a filename sweep (WinSxS,
/// WindowsApps) or trees that multiply scan time for nothing (node_modules).
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "windows.old",
    "$recycle.bin",
    "system volume information",
    "recovery",
    "perflogs",
    "windowsapps",
    "winsxs",
    ".git",
    "node_modules",
];

/// Configuration rejected at `start_scan` time, before any worker is spawned.
///
/// Distinct from traversal errors: a malformed option set is a caller bug,
/// while unreadable directories during the scan degrade silently.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The concurrency bound must admit at least one task.
    #[error("concurrency bound must be at least 1")]
    ZeroConcurrency,

    /// Extensions are compared whole, so they must carry the leading dot.
    #[error("extension {0:?} must start with a leading dot (e.g. \".exe\")")]
    MalformedExtension(String),
}

/// Immutable configuration for one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Keywords, stored lowercased so workers never re-fold them.
    keywords: Vec<CompactString>,
    /// Lowercased extensions in `".ext"` form. Empty means any extension.
    extensions: HashSet<String>,
    /// Recursion depth bound relative to the root (depth 0 = root).
    max_depth: usize,
    /// Scan-global bound on simultaneously active directory tasks.
    concurrency: usize,
    /// Lowercased directory basenames that are never entered or reported.
    excluded_dirs: HashSet<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS
                .iter()
                .map(|kw| CompactString::from(kw.to_lowercase()))
                .collect(),
            extensions: HashSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }
}

impl ScanOptions {
    /// Production defaults: built-in keyword list, standard exclusions,
    /// no extension filter, depth 10, concurrency 50.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the keyword list. Keywords are folded to lowercase on entry.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|kw| CompactString::from(kw.as_ref().to_lowercase()))
            .collect();
        self
    }

    /// Append keywords to the current list.
    pub fn add_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(
            keywords
                .into_iter()
                .map(|kw| CompactString::from(kw.as_ref().to_lowercase())),
        );
        self
    }

    /// Replace the extension allow-list (`".ext"` form, any case).
    /// An empty list removes the filter entirely.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Set the recursion depth bound (depth 0 = root only).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the scan-global concurrency bound.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Append directory basenames to the exclusion set.
    pub fn add_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_dirs
            .extend(dirs.into_iter().map(|d| d.as_ref().to_lowercase()));
        self
    }

    /// Reject malformed configuration before any scan work starts.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.concurrency == 0 {
            return Err(OptionsError::ZeroConcurrency);
        }
        for ext in &self.extensions {
            if !ext.starts_with('.') {
                return Err(OptionsError::MalformedExtension(ext.clone()));
            }
        }
        Ok(())
    }

    pub fn keywords(&self) -> &[CompactString] {
        &self.keywords
    }

    pub fn extensions(&self) -> &HashSet<String> {
        &self.extensions
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Whether a directory basename is excluded from traversal and reporting.
    ///
    /// Applied to directories only; an excluded directory is fully opaque
    /// (never keyword-checked, never descended, never reported).
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(&name.to_lowercase())
    }
}
