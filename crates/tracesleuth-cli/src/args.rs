/// Command-line arguments.
use clap::Parser;
use std::path::PathBuf;

/// Scans the standard Windows locations (AppData, system folders, Prefetch)
/// for filenames associated with cheat software and renders a labelled
/// report. Pass `--root` to sweep arbitrary directories instead.
#[derive(Debug, Parser)]
#[command(name = "tracesleuth", version, about)]
pub struct CliArgs {
    /// Scan these directories instead of the standard sweep locations
    /// (repeatable; each becomes its own report section).
    #[arg(long = "root", value_name = "PATH")]
    pub roots: Vec<PathBuf>,

    /// Recursion depth bound for --root scans (default 10; depth 0 scans
    /// only the root's immediate entries).
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Scan-global concurrency bound: simultaneously active directory
    /// tasks per scan (default 50).
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Restrict file matches in --root scans to these extensions, ".exe"
    /// form (repeatable; default: any extension).
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Additional keywords appended to the built-in list (repeatable).
    #[arg(long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// JSON configuration file overriding keywords, exclusions, extensions,
    /// depths, and concurrency.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the plain-text report to this file as well as stdout.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export every finding as CSV rows of (section, path).
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Emit the report as JSON on stdout instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (per-directory skips, sweep target detail).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse the process arguments. Wrapped so the thin binary does not need a
/// clap dependency of its own.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
