use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::error::Diagnostic;

/// Counters for one swept root.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub files_kept: usize,
    pub files_removed: usize,
    pub bytes_freed: u64,
    pub dirs_removed: usize,
}

#[derive(Debug)]
pub struct SweepReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub stats: SweepStats,
    /// One `DeletionFailure` per path that could not be removed.
    pub failures: Vec<Diagnostic>,
}

/// Deletes every file under a root that is not in the reachable set, then
/// every directory the deletions left empty. The root itself is kept.
#[derive(Debug)]
pub struct Sweeper<'a> {
    reachable: &'a HashSet<PathBuf>,
    dry_run: bool,
}

impl<'a> Sweeper<'a> {
    pub fn new(reachable: &'a HashSet<PathBuf>) -> Self {
        Self {
            reachable,
            dry_run: false,
        }
    }

    /// Report what would be removed without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn sweep(&self, root: &Path) -> SweepReport {
        let mut report = SweepReport {
            root: root.to_path_buf(),
            dry_run: self.dry_run,
            stats: SweepStats::default(),
            failures: Vec::new(),
        };

        if !root.is_dir() {
            debug!("Nothing to sweep, {:?} is not a directory", root);
            return report;
        }

        // Paths a dry run pretends to have deleted, so parents can still be
        // judged empty.
        let mut simulated: HashSet<PathBuf> = HashSet::new();

        // Post-order: a directory is yielded only after everything inside it.
        for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable path during sweep: {}", err);
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_dir() {
                if !is_empty_after_sweep(path, &simulated) {
                    continue;
                }
                if self.remove(path, true, &mut report.failures) {
                    report.stats.dirs_removed += 1;
                    if self.dry_run {
                        simulated.insert(path.to_path_buf());
                    }
                }
                continue;
            }

            if self.reachable.contains(path) {
                report.stats.files_kept += 1;
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if self.remove(path, false, &mut report.failures) {
                report.stats.files_removed += 1;
                report.stats.bytes_freed += size;
                if self.dry_run {
                    simulated.insert(path.to_path_buf());
                }
            }
        }

        info!(
            "{} {:?}: {} files removed ({} bytes), {} empty directories removed, {} files kept, {} failures",
            if self.dry_run { "Dry run of" } else { "Swept" },
            root,
            report.stats.files_removed,
            report.stats.bytes_freed,
            report.stats.dirs_removed,
            report.stats.files_kept,
            report.failures.len()
        );
        report
    }

    /// Returns true if the path is gone (or would be, in a dry run).
    fn remove(&self, path: &Path, is_dir: bool, failures: &mut Vec<Diagnostic>) -> bool {
        if self.dry_run {
            debug!("Would remove {:?}", path);
            return true;
        }

        let result = if is_dir {
            std::fs::remove_dir(path)
        } else {
            std::fs::remove_file(path)
        };

        match result {
            Ok(()) => {
                debug!("Removed {:?}", path);
                true
            }
            Err(source) => {
                warn!("Failed to remove {:?}: {}", path, source);
                failures.push(Diagnostic::DeletionFailure {
                    path: path.to_path_buf(),
                    source,
                });
                false
            }
        }
    }
}

/// A directory counts as empty when every child left in it is one the sweep
/// already removed (only possible in a dry run).
fn is_empty_after_sweep(dir: &Path, simulated: &HashSet<PathBuf>) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut children) => children.all(|child| {
            child
                .map(|c| simulated.contains(&c.path()))
                .unwrap_or(false)
        }),
        Err(e) => {
            debug!("Cannot list {:?}, keeping it: {}", dir, e);
            false
        }
    }
}
