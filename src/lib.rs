pub mod commands;
pub mod core;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::{CleanOptions, CleanReport};

/// Remove assets and libraries no installed version references any more.
#[derive(Debug, Parser)]
#[command(name = "mc-clean", version, about)]
pub struct Cli {
    /// Launcher data directory (the one holding `versions`, `assets` and `libraries`)
    pub root: PathBuf,

    /// Report what would be removed without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Leave `assets/` untouched
    #[arg(long)]
    pub skip_assets: bool,

    /// Leave `libraries/` untouched
    #[arg(long)]
    pub skip_libraries: bool,

    /// Log every file kept or removed
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<&Cli> for CleanOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            root: cli.root.clone(),
            dry_run: cli.dry_run,
            sweep_assets: !cli.skip_assets,
            sweep_libraries: !cli.skip_libraries,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the diagnostics and the summary.
    let default_filter = if cli.verbose {
        "info,mc_clean_lib=debug"
    } else {
        "info,mc_clean_lib=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let report = commands::run_clean(&CleanOptions::from(&cli));
    write_report(&mut io::stdout().lock(), &report)?;
    Ok(())
}

/// One line per diagnostic, then the scan summary and one line per swept root.
pub fn write_report(out: &mut impl Write, report: &CleanReport) -> io::Result<()> {
    for diagnostic in report.all_diagnostics() {
        writeln!(out, "{}", diagnostic)?;
    }

    writeln!(
        out,
        "Scanned {} versions ({} skipped) in {}",
        report.versions_scanned,
        report.versions_skipped,
        report.root.display()
    )?;
    for sweep in report.sweeps() {
        let verb = if sweep.dry_run { "would remove" } else { "removed" };
        writeln!(
            out,
            "{}: {} {} files ({} bytes) and {} empty directories, kept {} files",
            sweep.root.display(),
            verb,
            sweep.stats.files_removed,
            sweep.stats.bytes_freed,
            sweep.stats.dirs_removed,
            sweep.stats.files_kept
        )?;
    }
    Ok(())
}
