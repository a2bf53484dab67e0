// ─── Version File ───
// Lenient reader for `versions/<id>/<id>.json`. Vanilla, Fabric, Quilt and
// Forge all write slightly different shapes, so library entries stay untyped.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::core::error::{CleanError, CleanResult};
use crate::core::layout::join_relative;
use crate::core::maven::MavenArtifact;

/// The parts of a version JSON the cleaner cares about.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionJson {
    #[serde(default)]
    pub asset_index: Option<Value>,
    #[serde(default)]
    pub libraries: Option<Value>,
    #[serde(default)]
    pub logging: Option<Value>,
}

impl VersionJson {
    /// Read and parse a manifest from disk.
    pub fn load(path: &Path) -> CleanResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CleanError::ManifestMissing(path.to_path_buf()));
            }
            Err(e) => return Err(CleanError::io(path, e)),
        };
        Self::parse(path, &raw)
    }

    pub fn parse(path: &Path, raw: &str) -> CleanResult<Self> {
        serde_json::from_str(raw).map_err(|source| CleanError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `assetIndex.id`, if the manifest names one.
    pub fn asset_index_id(&self) -> Option<&str> {
        self.asset_index.as_ref()?.get("id")?.as_str()
    }

    /// `logging.client.file.id`: the log4j config stored under `assets/log_configs`.
    pub fn logging_config_id(&self) -> Option<&str> {
        self.logging
            .as_ref()?
            .get("client")?
            .get("file")?
            .get("id")?
            .as_str()
    }

    /// Library entries; a missing, `null` or non-array list is empty.
    pub fn libraries(&self) -> &[Value] {
        self.libraries
            .as_ref()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

// ─── Library Entry Shapes ───

/// How a single library entry locates its file(s) under `libraries/`.
#[derive(Debug, PartialEq, Eq)]
pub enum LibraryShape {
    /// `downloads.artifact.path`
    Artifact(String),
    /// `downloads.classifiers.<name>.path`, one per native classifier.
    /// `unresolved` names the classifiers that carry no `path`.
    Classifiers {
        paths: Vec<String>,
        unresolved: Vec<String>,
    },
    /// A bare Maven coordinate in `name`, served from a repository in `url`.
    Coordinate(MavenArtifact),
    /// None of the above; the entry resolves to nothing.
    Unrecognized,
}

impl LibraryShape {
    /// Classify an entry. `downloads` wins over `url`; inside `downloads`,
    /// `artifact` wins over `classifiers`.
    pub fn of(entry: &Value) -> Self {
        if let Some(downloads) = non_null(entry, "downloads") {
            if let Some(artifact) = non_null(downloads, "artifact") {
                return match artifact.get("path").and_then(Value::as_str) {
                    Some(path) => LibraryShape::Artifact(path.to_string()),
                    None => LibraryShape::Unrecognized,
                };
            }

            if let Some(classifiers) = non_null(downloads, "classifiers") {
                let mut paths = Vec::new();
                let mut unresolved = Vec::new();
                for (classifier, native) in classifiers.as_object().into_iter().flatten() {
                    match native.get("path").and_then(Value::as_str) {
                        Some(path) => paths.push(path.to_string()),
                        None => unresolved.push(classifier.clone()),
                    }
                }
                return if paths.is_empty() {
                    LibraryShape::Unrecognized
                } else {
                    LibraryShape::Classifiers { paths, unresolved }
                };
            }

            return LibraryShape::Unrecognized;
        }

        if non_null(entry, "url").is_some() {
            if let Some(artifact) = entry
                .get("name")
                .and_then(Value::as_str)
                .and_then(|name| MavenArtifact::parse(name).ok())
            {
                return LibraryShape::Coordinate(artifact);
            }
        }

        LibraryShape::Unrecognized
    }

    /// Absolute file paths under `libraries_dir`. Empty for `Unrecognized`.
    pub fn resolve(&self, libraries_dir: &Path) -> Vec<PathBuf> {
        match self {
            LibraryShape::Artifact(path) => vec![join_relative(libraries_dir, path)],
            LibraryShape::Classifiers { paths, .. } => paths
                .iter()
                .map(|p| join_relative(libraries_dir, p))
                .collect(),
            LibraryShape::Coordinate(artifact) => vec![libraries_dir.join(artifact.relative_path())],
            LibraryShape::Unrecognized => vec![],
        }
    }
}

fn non_null<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}
