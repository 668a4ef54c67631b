/// TraceSleuth CLI: argument handling, sweep orchestration, report output.
///
/// This crate contains everything between the thin binary entry point and
/// `tracesleuth-core`. With no `--root` arguments it runs the standard
/// Windows sweep (AppData, system folders, Prefetch); with them it sweeps
/// the given directories, one report section per root.
pub mod args;
pub mod config;
pub mod report;

use anyhow::{Context, Result};
use tracesleuth_core::sweep::{self, SweepProfile, SweepTarget};
use tracing::info;

use args::CliArgs;

/// Run one sweep and emit the requested outputs.
pub fn run(args: CliArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::FileConfig::default(),
    };
    let resolved = config::resolve(&args, &file_config)?;

    let profiles = if args.roots.is_empty() {
        sweep::standard_profiles(&resolved.depths)
    } else {
        args.roots
            .iter()
            .map(|root| {
                // Findings are reported as absolute paths, so anchor relative
                // roots to the working directory up front.
                let root = std::path::absolute(root).unwrap_or_else(|_| root.clone());
                SweepProfile {
                    label: root.display().to_string(),
                    targets: vec![SweepTarget {
                        root,
                        max_depth: resolved.adhoc_depth,
                    }],
                    extensions: resolved.adhoc_extensions.clone(),
                }
            })
            .collect()
    };

    let sweep_report = sweep::run_sweep(&profiles, &resolved.options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sweep_report)?);
    } else {
        print!("{}", report::render_text(&sweep_report));
    }

    if let Some(path) = &args.output {
        std::fs::write(path, report::render_text(&sweep_report))
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("report written to {}", path.display());
    }

    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create CSV file {}", path.display()))?;
        report::write_csv(&sweep_report, file)?;
        info!("CSV export written to {}", path.display());
    }

    Ok(())
}
