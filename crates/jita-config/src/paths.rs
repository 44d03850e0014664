use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Output layout: `<root>/data` for JSON, `<root>/images` for illustrations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub root: PathBuf,
}

impl PathsConfig {
    pub fn new() -> Self {
        let root = std::env::var("JITA_ROOT").unwrap_or_else(|_| ".".to_string());
        Self::at(root)
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    /// One JSON file per pair
    pub fn pairs_dir(&self) -> PathBuf {
        self.data_dir().join("pairs")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn all_file(&self) -> PathBuf {
        self.data_dir().join("all.json")
    }

    /// Resolve a path stored in a record (`images/x.jpg`) against the root
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::new()
    }
}
