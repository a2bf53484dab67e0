use std::path::{Path, PathBuf};

/// Directory layout of a launcher data root (`.minecraft` or equivalent).
#[derive(Debug, Clone)]
pub struct LauncherLayout {
    root: PathBuf,
}

impl LauncherLayout {
    /// Build a layout, resolving `root` to an absolute path when it exists.
    /// A missing root is kept as given; every phase then finds nothing to do.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::fs::canonicalize(&root).unwrap_or(root);
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    pub fn libraries_dir(&self) -> PathBuf {
        self.root.join("libraries")
    }

    pub fn asset_index_file(&self, id: &str) -> PathBuf {
        self.assets_dir().join("indexes").join(format!("{}.json", id))
    }

    /// `assets/objects/<hash[0:2]>/<hash>`, or `None` when the hash has no
    /// two-character prefix.
    pub fn asset_object_file(&self, hash: &str) -> Option<PathBuf> {
        let prefix = hash.get(..2).filter(|p| p.chars().count() == 2)?;
        Some(self.assets_dir().join("objects").join(prefix).join(hash))
    }

    pub fn log_config_file(&self, id: &str) -> PathBuf {
        join_relative(&self.assets_dir().join("log_configs"), id)
    }

    pub fn virtual_asset_file(&self, index_id: &str, name: &str) -> PathBuf {
        join_relative(&self.assets_dir().join("virtual").join(index_id), name)
    }

    /// `<version dir>/<version dir name>.json`
    pub fn manifest_file(version_dir: &Path) -> Option<PathBuf> {
        let name = version_dir.file_name()?;
        let mut file = name.to_os_string();
        file.push(".json");
        Some(version_dir.join(file))
    }
}

/// Join a `/`-separated path taken from a manifest onto `base`, one component
/// at a time, so the result compares equal to paths produced by a directory walk.
/// Empty and `.` segments are dropped.
pub fn join_relative(base: &Path, relative: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in relative.split(['/', '\\']) {
        if segment.is_empty() || segment == "." {
            continue;
        }
        path.push(segment);
    }
    path
}
