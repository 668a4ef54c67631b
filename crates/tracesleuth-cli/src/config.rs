/// Configuration file loading and option resolution.
///
/// Precedence, lowest to highest: built-in defaults, the JSON configuration
/// file, command-line flags. The file is entirely optional and every field
/// in it is optional too.
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracesleuth_core::options::ScanOptions;
use tracesleuth_core::sweep::SweepDepths;

use crate::args::CliArgs;

/// On-disk configuration shape.
///
/// `keywords` replaces the built-in list wholesale; `extra_keywords` and
/// `excluded_dirs` extend their defaults instead.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub keywords: Option<Vec<String>>,
    pub extra_keywords: Vec<String>,
    pub excluded_dirs: Vec<String>,
    /// Extension allow-list for --root scans (".ext" form).
    pub extensions: Option<Vec<String>>,
    pub concurrency: Option<usize>,
    pub appdata_depth: Option<usize>,
    pub windows_depth: Option<usize>,
    pub program_files_depth: Option<usize>,
    pub user_folders_depth: Option<usize>,
}

/// Load and parse a configuration file.
pub fn load(path: &Path) -> Result<FileConfig> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Everything `run` needs after merging defaults, file, and flags.
#[derive(Debug)]
pub struct Resolved {
    /// Keywords, exclusions, and concurrency; extensions and depth are
    /// applied per profile or per --root scan.
    pub options: ScanOptions,
    /// Extension allow-list for --root scans.
    pub adhoc_extensions: Vec<String>,
    /// Depth bound for --root scans.
    pub adhoc_depth: usize,
    /// Per-area depths for the standard profiles.
    pub depths: SweepDepths,
}

/// Merge the three configuration layers and validate the result up front,
/// so a malformed extension or a zero bound fails before any scan starts.
pub fn resolve(args: &CliArgs, file: &FileConfig) -> Result<Resolved> {
    let mut options = ScanOptions::default();

    if let Some(keywords) = &file.keywords {
        options = options.with_keywords(keywords.iter().map(String::as_str));
    }
    options = options
        .add_keywords(file.extra_keywords.iter().map(String::as_str))
        .add_keywords(args.keywords.iter().map(String::as_str))
        .add_excluded_dirs(file.excluded_dirs.iter().map(String::as_str));

    if let Some(concurrency) = args.concurrency.or(file.concurrency) {
        options = options.with_concurrency(concurrency);
    }

    let adhoc_extensions = if !args.extensions.is_empty() {
        args.extensions.clone()
    } else {
        file.extensions.clone().unwrap_or_default()
    };

    // Probe-validate with the ad-hoc extensions attached; the standard
    // profiles use built-in lists that are correct by construction.
    options
        .clone()
        .with_extensions(adhoc_extensions.iter().cloned())
        .validate()
        .context("invalid scan configuration")?;

    let defaults = SweepDepths::default();
    let depths = SweepDepths {
        appdata: file.appdata_depth.unwrap_or(defaults.appdata),
        windows: file.windows_depth.unwrap_or(defaults.windows),
        program_files: file.program_files_depth.unwrap_or(defaults.program_files),
        user_folders: file.user_folders_depth.unwrap_or(defaults.user_folders),
    };

    Ok(Resolved {
        options,
        adhoc_extensions,
        adhoc_depth: args
            .depth
            .unwrap_or(tracesleuth_core::options::DEFAULT_MAX_DEPTH),
        depths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("tracesleuth").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults_resolve_without_a_config_file() {
        let resolved = resolve(&args(&[]), &FileConfig::default()).expect("must resolve");
        assert_eq!(
            resolved.options.concurrency(),
            tracesleuth_core::options::DEFAULT_CONCURRENCY
        );
        assert!(resolved.adhoc_extensions.is_empty());
        assert_eq!(
            resolved.adhoc_depth,
            tracesleuth_core::options::DEFAULT_MAX_DEPTH
        );
    }

    #[test]
    fn config_file_fields_are_all_optional() {
        let cfg: FileConfig = serde_json::from_str("{}").expect("must parse");
        assert!(cfg.keywords.is_none());
        assert!(cfg.extra_keywords.is_empty());
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        let result: std::result::Result<FileConfig, _> =
            serde_json::from_str(r#"{"keyword": ["typo"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn file_keywords_replace_and_extras_extend() {
        let cfg: FileConfig = serde_json::from_str(
            r#"{"keywords": ["alpha"], "extra_keywords": ["beta"]}"#,
        )
        .expect("must parse");
        let resolved = resolve(&args(&["--keyword", "gamma"]), &cfg).expect("must resolve");

        let keywords: Vec<&str> = resolved
            .options
            .keywords()
            .iter()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keywords, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn cli_flags_override_the_config_file() {
        let cfg: FileConfig =
            serde_json::from_str(r#"{"concurrency": 10, "extensions": [".dll"]}"#)
                .expect("must parse");
        let resolved =
            resolve(&args(&["--concurrency", "4", "--ext", ".exe"]), &cfg).expect("must resolve");

        assert_eq!(resolved.options.concurrency(), 4);
        assert_eq!(resolved.adhoc_extensions, vec![".exe".to_string()]);
    }

    #[test]
    fn config_depths_override_profile_defaults() {
        let cfg: FileConfig =
            serde_json::from_str(r#"{"appdata_depth": 3, "windows_depth": 1}"#).expect("must parse");
        let resolved = resolve(&args(&[]), &cfg).expect("must resolve");

        assert_eq!(resolved.depths.appdata, 3);
        assert_eq!(resolved.depths.windows, 1);
        assert_eq!(
            resolved.depths.program_files,
            SweepDepths::default().program_files
        );
    }

    #[test]
    fn malformed_extension_fails_resolution() {
        let resolved = resolve(&args(&["--ext", "exe"]), &FileConfig::default());
        assert!(resolved.is_err());
    }

    #[test]
    fn zero_concurrency_fails_resolution() {
        let resolved = resolve(&args(&["--concurrency", "0"]), &FileConfig::default());
        assert!(resolved.is_err());
    }
}
