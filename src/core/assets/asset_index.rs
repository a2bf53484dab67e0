use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::error::{CleanError, CleanResult};
use crate::core::layout::LauncherLayout;

/// Top-level asset index JSON structure (`assets/indexes/<id>.json`).
#[derive(Debug, Deserialize)]
pub struct AssetIndex {
    #[serde(default)]
    pub objects: HashMap<String, AssetObject>,
    #[serde(default)]
    pub r#virtual: Option<Value>,
}

/// Only the hash is read; `size` and any other field may hold anything.
#[derive(Debug, Deserialize)]
pub struct AssetObject {
    pub hash: String,
}

impl AssetIndex {
    pub fn load(path: &Path) -> CleanResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| CleanError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| CleanError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pre-1.7 indexes mirror every object under `assets/virtual/<id>/<name>`.
    pub fn is_virtual(&self) -> bool {
        self.r#virtual
            .as_ref()
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Every file this index keeps alive, the object store entries first.
    ///
    /// Fails with `InvalidHash` on the first hash too short to yield the
    /// two-character object directory.
    pub fn referenced_files(
        &self,
        layout: &LauncherLayout,
        index_id: &str,
        index_path: &Path,
    ) -> CleanResult<Vec<PathBuf>> {
        let mut files = Vec::with_capacity(self.objects.len());

        let is_virtual = self.is_virtual();
        for (name, obj) in &self.objects {
            let object = layout
                .asset_object_file(&obj.hash)
                .ok_or_else(|| CleanError::InvalidHash {
                    index: index_path.to_path_buf(),
                    hash: obj.hash.clone(),
                })?;
            files.push(object);

            if is_virtual {
                files.push(layout.virtual_asset_file(index_id, name));
            }
        }

        debug!(
            "Asset index {} references {} objects (virtual: {})",
            index_id,
            self.objects.len(),
            is_virtual
        );
        Ok(files)
    }
}
