use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Central error type for the cleaner.
/// Every fallible core function returns `Result<T, CleanError>`.
#[derive(Debug, Error)]
pub enum CleanError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Manifests ───────────────────────────────────────
    #[error("Version manifest not found: {0:?}")]
    ManifestMissing(PathBuf),

    #[error("Malformed JSON in {path:?}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid asset hash {hash:?} in {index:?}")]
    InvalidHash { index: PathBuf, hash: String },

    // ── Maven ───────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),
}

/// Convenience alias used throughout the crate.
pub type CleanResult<T> = Result<T, CleanError>;

impl CleanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleanError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Non-fatal findings collected during a run. None of these stop the run.
#[derive(Debug)]
pub enum Diagnostic {
    /// A version whose manifest (or asset index) could not be used.
    SkippedVersion { version: String, error: CleanError },
    /// A library entry matching none of the known shapes. Carries the raw JSON.
    UnrecognizedLibraryShape {
        version: String,
        entry: serde_json::Value,
    },
    /// A file or directory that could not be removed; it stays in place.
    DeletionFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedVersion { version, error } => {
                write!(f, "skipped version {}: {}", version, error)
            }
            Diagnostic::UnrecognizedLibraryShape { version, entry } => {
                write!(f, "unrecognized library in {}: {}", version, entry)
            }
            Diagnostic::DeletionFailure { path, source } => {
                write!(f, "could not delete {:?}: {}", path, source)
            }
        }
    }
}
