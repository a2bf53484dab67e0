use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::error::Diagnostic;
use crate::core::layout::LauncherLayout;
use crate::core::reachability;
use crate::core::sweep::{SweepReport, Sweeper};

/// Everything a clean run needs; built from the command line by the binary.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub root: PathBuf,
    pub dry_run: bool,
    pub sweep_assets: bool,
    pub sweep_libraries: bool,
}

impl CleanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
            sweep_assets: true,
            sweep_libraries: true,
        }
    }
}

#[derive(Debug)]
pub struct CleanReport {
    pub root: PathBuf,
    pub versions_scanned: usize,
    pub versions_skipped: usize,
    /// `None` when the phase was disabled or `assets/` does not exist.
    pub assets: Option<SweepReport>,
    /// `None` when the phase was disabled or `libraries/` does not exist.
    pub libraries: Option<SweepReport>,
    /// Collector findings (skipped versions, unrecognized libraries).
    pub diagnostics: Vec<Diagnostic>,
}

impl CleanReport {
    /// Collector diagnostics followed by every deletion failure.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().chain(
            self.assets
                .iter()
                .chain(self.libraries.iter())
                .flat_map(|sweep| sweep.failures.iter()),
        )
    }

    pub fn sweeps(&self) -> impl Iterator<Item = &SweepReport> {
        self.assets.iter().chain(self.libraries.iter())
    }
}

/// Collect the reachable files of every installed version, then sweep
/// `assets/` and `libraries/` against them. Never fails: problems end up in
/// the report's diagnostics.
pub fn run_clean(options: &CleanOptions) -> CleanReport {
    let layout = LauncherLayout::new(&options.root);
    info!(
        "Cleaning launcher directory {:?}{}",
        layout.root(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let collection = reachability::collect(&layout);

    let sweep = |enabled: bool, root: PathBuf, reachable: &HashSet<PathBuf>| {
        if !enabled {
            debug!("Sweep of {:?} disabled", root);
            return None;
        }
        if !root.is_dir() {
            debug!("Skipping sweep, {:?} does not exist", root);
            return None;
        }
        Some(Sweeper::new(reachable).dry_run(options.dry_run).sweep(&root))
    };

    let assets = sweep(
        options.sweep_assets,
        layout.assets_dir(),
        &collection.reachable.assets,
    );
    let libraries = sweep(
        options.sweep_libraries,
        layout.libraries_dir(),
        &collection.reachable.libraries,
    );

    CleanReport {
        root: layout.root().to_path_buf(),
        versions_scanned: collection.versions_scanned,
        versions_skipped: collection.versions_skipped,
        assets,
        libraries,
        diagnostics: collection.diagnostics,
    }
}
