/// TraceSleuth Core: keyword scanning engine and sweep orchestration.
///
/// This crate contains all scanning logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI).
///
/// # Modules
///
/// - [`options`] - Scan configuration, defaults, and validation.
/// - [`matcher`] - Keyword and extension match predicate.
/// - [`scanner`] - Bounded-concurrency recursive directory traversal.
/// - [`sweep`] - Labelled multi-root scan profiles (AppData, system, Prefetch).
/// - [`platform`] - Well-known Windows folder resolution.
pub mod matcher;
pub mod options;
pub mod platform;
pub mod scanner;
pub mod sweep;
