/// Match predicate: decides whether a directory entry's basename is of
/// interest to the sweep.
///
/// Pure string logic, no I/O and no shared state. The scanner evaluates each
/// entry of a non-excluded directory against this predicate exactly once.
use crate::options::ScanOptions;
use compact_str::CompactString;
use std::collections::HashSet;
use std::path::Path;

/// Case-insensitive keyword and extension predicate.
///
/// Snapshots the relevant parts of [`ScanOptions`] so the hot loop touches
/// only this small struct.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    /// Lowercased keywords; any single substring hit is sufficient.
    keywords: Vec<CompactString>,
    /// Lowercased `".ext"` allow-list for files. Empty means any extension.
    extensions: HashSet<String>,
}

impl KeywordMatcher {
    pub fn from_options(options: &ScanOptions) -> Self {
        Self {
            keywords: options.keywords().to_vec(),
            extensions: options.extensions().clone(),
        }
    }

    /// True when `name` contains any configured keyword as a
    /// case-insensitive substring.
    pub fn contains_keyword(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.keywords.iter().any(|kw| lower.contains(kw.as_str()))
    }

    /// Full predicate for one directory entry.
    ///
    /// A keyword hit is necessary in both cases. Directories then match
    /// unconditionally; files must additionally pass the extension allow-list
    /// when one is configured. The extension is compared whole, leading dot
    /// included, case-insensitively, so `archive.tar.gz` is checked as
    /// `".gz"` and a file without any extension never passes a non-empty
    /// allow-list.
    pub fn matches_entry(&self, name: &str, is_dir: bool) -> bool {
        if !self.contains_keyword(name) {
            return false;
        }
        if is_dir || self.extensions.is_empty() {
            return true;
        }
        match Path::new(name).extension() {
            Some(ext) => {
                let dotted = format!(".{}", ext.to_string_lossy().to_lowercase());
                self.extensions.contains(&dotted)
            }
            None => false,
        }
    }
}
