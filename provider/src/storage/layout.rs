//! Storage layout configuration

use std::path::PathBuf;

use crate::filesys::file::File;

/// Where settings and resource state live on disk
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Base directory for all storage
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the settings file path
    pub fn settings_file(&self) -> File {
        File::new(self.base_dir.join("settings.json"))
    }

    /// Get the resource state file path
    pub fn state_file(&self) -> File {
        File::new(self.base_dir.join("state.json"))
    }
}

impl Default for StorageLayout {
    /// `.octoform` in the working directory
    fn default() -> Self {
        Self::new(".octoform")
    }
}
