//! TraceSleuth: forensic filename sweep for cheat-software residue.
//!
//! Thin binary entry point. All logic lives in the `tracesleuth-core`
//! and `tracesleuth-cli` crates.

fn main() -> anyhow::Result<()> {
    let args = tracesleuth_cli::args::parse();

    // Initialise structured logging. `--verbose` raises the level to DEBUG,
    // which also surfaces the per-directory skip messages from the scanner.
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    tracing::info!("TraceSleuth starting");

    tracesleuth_cli::run(args)
}
