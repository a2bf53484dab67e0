use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::assets::AssetIndex;
use crate::core::error::{CleanError, CleanResult, Diagnostic};
use crate::core::layout::LauncherLayout;
use crate::core::version::{LibraryShape, VersionJson};

/// Files still referenced by at least one installed version.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReachableSet {
    pub assets: HashSet<PathBuf>,
    pub libraries: HashSet<PathBuf>,
}

impl ReachableSet {
    fn merge(&mut self, other: ReachableSet) {
        self.assets.extend(other.assets);
        self.libraries.extend(other.libraries);
    }
}

/// Result of scanning every version under `versions/`.
#[derive(Debug, Default)]
pub struct Collection {
    pub reachable: ReachableSet,
    pub versions_scanned: usize,
    pub versions_skipped: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Walk `versions/` and gather the reachable asset and library files.
///
/// A version whose manifest is missing or malformed is reported in
/// `diagnostics` and contributes nothing; the remaining versions are still
/// collected. A missing `versions/` directory yields an empty collection.
pub fn collect(layout: &LauncherLayout) -> Collection {
    let mut collection = Collection::default();

    for version_dir in version_dirs(&layout.versions_dir()) {
        let name = version_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut found = ReachableSet::default();
        let result = collect_version(
            layout,
            &version_dir,
            &name,
            &mut found,
            &mut collection.diagnostics,
        );

        match result {
            Ok(()) => {
                debug!(
                    "Version {}: {} assets, {} libraries",
                    name,
                    found.assets.len(),
                    found.libraries.len()
                );
                collection.reachable.merge(found);
                collection.versions_scanned += 1;
            }
            Err(error) => {
                warn!("Skipping version {}: {}", name, error);
                collection.versions_skipped += 1;
                collection
                    .diagnostics
                    .push(Diagnostic::SkippedVersion { version: name, error });
            }
        }
    }

    info!(
        "Collected {} reachable assets and {} reachable libraries from {} versions",
        collection.reachable.assets.len(),
        collection.reachable.libraries.len(),
        collection.versions_scanned
    );
    collection
}

/// Immediate subdirectories of `versions/`, sorted by name.
fn version_dirs(versions_dir: &Path) -> Vec<PathBuf> {
    let read_dir = match std::fs::read_dir(versions_dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            debug!("No versions to scan in {:?}: {}", versions_dir, e);
            return vec![];
        }
    };

    let mut dirs: Vec<PathBuf> = read_dir
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn collect_version(
    layout: &LauncherLayout,
    version_dir: &Path,
    name: &str,
    found: &mut ReachableSet,
    diagnostics: &mut Vec<Diagnostic>,
) -> CleanResult<()> {
    let manifest_path = LauncherLayout::manifest_file(version_dir)
        .ok_or_else(|| CleanError::ManifestMissing(version_dir.to_path_buf()))?;
    let manifest = VersionJson::load(&manifest_path)?;

    // ── Assets ──
    match manifest.asset_index_id() {
        Some(index_id) => {
            let index_path = layout.asset_index_file(index_id);
            if index_path.is_file() {
                let index = AssetIndex::load(&index_path)?;
                found
                    .assets
                    .extend(index.referenced_files(layout, index_id, &index_path)?);
                found.assets.insert(index_path);
            } else {
                debug!("Version {}: asset index {:?} not on disk", name, index_path);
            }
        }
        None => debug!("Version {}: no assetIndex", name),
    }

    if let Some(log_config) = manifest.logging_config_id() {
        found.assets.insert(layout.log_config_file(log_config));
    }

    // ── Libraries ──
    let libraries_dir = layout.libraries_dir();
    for entry in manifest.libraries() {
        let shape = LibraryShape::of(entry);
        if shape == LibraryShape::Unrecognized {
            warn!("Version {}: unrecognized library entry {}", name, entry);
            diagnostics.push(Diagnostic::UnrecognizedLibraryShape {
                version: name.to_string(),
                entry: entry.clone(),
            });
            continue;
        }
        if let LibraryShape::Classifiers { unresolved, .. } = &shape {
            if !unresolved.is_empty() {
                warn!(
                    "Version {}: classifiers without a path {:?} in {}",
                    name, unresolved, entry
                );
                diagnostics.push(Diagnostic::UnrecognizedLibraryShape {
                    version: name.to_string(),
                    entry: entry.clone(),
                });
            }
        }
        found.libraries.extend(shape.resolve(&libraries_dir));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_json(path: &Path, value: &serde_json::Value) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    }

    fn write_version(root: &Path, name: &str, manifest: serde_json::Value) {
        write_json(
            &root.join("versions").join(name).join(format!("{name}.json")),
            &manifest,
        );
    }

    #[test]
    fn every_indexed_object_is_reachable() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());
        write_version(temp.path(), "1.20", json!({ "assetIndex": { "id": "7" } }));
        write_json(
            &temp.path().join("assets/indexes/7.json"),
            &json!({ "objects": {
                "a.ogg": { "hash": "abcdef1234", "size": 1 },
                "b.png": { "hash": "0011223344", "size": 2 }
            }}),
        );

        let c = collect(&layout);
        let assets = &c.reachable.assets;
        assert_eq!(assets.len(), 3);
        assert!(assets.contains(&layout.asset_index_file("7")));
        assert!(assets.contains(&layout.assets_dir().join("objects/ab/abcdef1234")));
        assert!(assets.contains(&layout.assets_dir().join("objects/00/0011223344")));
        assert_eq!(c.versions_scanned, 1);
    }

    #[test]
    fn missing_asset_index_file_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());
        write_version(
            temp.path(),
            "1.8.9",
            json!({
                "assetIndex": { "id": "1.8" },
                "libraries": [{ "downloads": { "artifact": { "path": "x/y/1/y-1.jar" } } }]
            }),
        );

        let c = collect(&layout);
        assert!(c.reachable.assets.is_empty());
        assert_eq!(c.reachable.libraries.len(), 1);
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn broken_versions_are_skipped_and_others_still_collected() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());

        // No manifest at all.
        std::fs::create_dir_all(temp.path().join("versions/empty")).unwrap();
        // Malformed JSON.
        let bad = temp.path().join("versions/bad/bad.json");
        std::fs::create_dir_all(bad.parent().unwrap()).unwrap();
        std::fs::write(&bad, "{ \"libraries\": [").unwrap();
        // Manifest named after a different directory.
        write_json(
            &temp.path().join("versions/renamed/other.json"),
            &json!({ "libraries": [] }),
        );
        write_version(
            temp.path(),
            "good",
            json!({ "libraries": [{ "name": "net.fabricmc:intermediary:1.20", "url": "https://maven.fabricmc.net/" }] }),
        );

        let c = collect(&layout);
        assert_eq!(c.versions_scanned, 1);
        assert_eq!(c.versions_skipped, 3);
        assert!(c.reachable.libraries.contains(
            &layout
                .libraries_dir()
                .join("net/fabricmc/intermediary/1.20/intermediary-1.20.jar")
        ));

        let skipped: Vec<&str> = c
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::SkippedVersion { version, .. } => Some(version.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(skipped, vec!["bad", "empty", "renamed"]);
    }

    #[test]
    fn short_hash_discards_the_whole_version() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());
        write_version(
            temp.path(),
            "broken",
            json!({
                "assetIndex": { "id": "x" },
                "libraries": [{ "downloads": { "artifact": { "path": "keep/me.jar" } } }]
            }),
        );
        write_json(
            &temp.path().join("assets/indexes/x.json"),
            &json!({ "objects": { "a": { "hash": "f" } } }),
        );

        let c = collect(&layout);
        assert_eq!(c.reachable, ReachableSet::default());
        assert!(matches!(
            c.diagnostics.as_slice(),
            [Diagnostic::SkippedVersion {
                error: CleanError::InvalidHash { .. },
                ..
            }]
        ));
    }

    #[test]
    fn unrecognized_library_is_reported_and_resolves_nothing() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());
        write_version(
            temp.path(),
            "forge",
            json!({ "libraries": [
                { "name": "net.minecraftforge:forge:1.20.1-47.2.0" },
                { "downloads": { "artifact": { "path": "ok/ok/1/ok-1.jar" } } }
            ]}),
        );

        let c = collect(&layout);
        assert_eq!(c.versions_scanned, 1);
        assert_eq!(c.reachable.libraries.len(), 1);
        assert!(matches!(
            c.diagnostics.as_slice(),
            [Diagnostic::UnrecognizedLibraryShape { version, .. }] if version == "forge"
        ));
    }

    #[test]
    fn log_config_is_kept() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());
        write_version(
            temp.path(),
            "1.12.2",
            json!({ "logging": { "client": { "file": { "id": "client-1.12.xml" } } } }),
        );

        let c = collect(&layout);
        assert!(c
            .reachable
            .assets
            .contains(&layout.assets_dir().join("log_configs/client-1.12.xml")));
    }

    #[test]
    fn missing_versions_directory_collects_nothing() {
        let temp = TempDir::new().unwrap();
        let c = collect(&LauncherLayout::new(temp.path()));
        assert_eq!(c.versions_scanned + c.versions_skipped, 0);
        assert_eq!(c.reachable, ReachableSet::default());
    }

    #[test]
    fn classifier_without_path_is_reported_but_the_rest_resolve() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());
        write_version(
            temp.path(),
            "1.12.2",
            json!({ "libraries": [{ "downloads": { "classifiers": {
                "natives-linux": { "path": "org/lwjgl/p/2.9.4/p-2.9.4-natives-linux.jar" },
                "natives-osx": { "url": "https://libraries.minecraft.net/x.jar" }
            }}}]}),
        );

        let c = collect(&layout);
        assert_eq!(c.versions_scanned, 1);
        assert!(c.reachable.libraries.contains(
            &layout
                .libraries_dir()
                .join("org/lwjgl/p/2.9.4/p-2.9.4-natives-linux.jar")
        ));
        assert!(matches!(
            c.diagnostics.as_slice(),
            [Diagnostic::UnrecognizedLibraryShape { version, .. }] if version == "1.12.2"
        ));
    }

    #[test]
    fn loosely_typed_fields_do_not_drop_a_version() {
        let temp = TempDir::new().unwrap();
        let layout = LauncherLayout::new(temp.path());
        write_version(
            temp.path(),
            "v",
            json!({
                "id": 120,
                "assetIndex": { "id": "7" },
                "libraries": [{ "downloads": { "artifact": { "path": "a/b/1/b-1.jar" } } }]
            }),
        );
        write_json(
            &temp.path().join("assets/indexes/7.json"),
            &json!({ "objects": { "a": { "hash": "abcdef", "size": null } } }),
        );

        let c = collect(&layout);
        assert_eq!(c.versions_skipped, 0);
        assert!(c.diagnostics.is_empty());
        assert!(c
            .reachable
            .assets
            .contains(&layout.assets_dir().join("objects/ab/abcdef")));
        assert!(c
            .reachable
            .libraries
            .contains(&layout.libraries_dir().join("a/b/1/b-1.jar")));
    }
}
