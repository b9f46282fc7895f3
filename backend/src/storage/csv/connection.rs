//! # Flat-file Connection
//!
//! Resolves the data directory and the files inside it, and provides the
//! atomic write used by every repository.
//!
//! ```text
//! data/
//! ├── global_config.yaml
//! ├── users.yaml
//! └── activities.csv
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const USERS_FILE: &str = "users.yaml";
const ACTIVITIES_FILE: &str = "activities.csv";
const GLOBAL_CONFIG_FILE: &str = "global_config.yaml";

/// CsvConnection owns the base directory every repository reads from
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Default data directory: `~/Documents/SuperKids`
    pub fn default_data_directory() -> Result<PathBuf> {
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(documents_dir.join("SuperKids"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn users_file_path(&self) -> PathBuf {
        self.base_directory.join(USERS_FILE)
    }

    pub fn activities_file_path(&self) -> PathBuf {
        self.base_directory.join(ACTIVITIES_FILE)
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.base_directory.join(GLOBAL_CONFIG_FILE)
    }

    /// Replace `path` with `contents` via a uniquely named temp file and rename
    pub fn write_atomically(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let mut temp_file = NamedTempFile::new_in(&self.base_directory)
            .with_context(|| format!("Failed to create temp file in {}", self.base_directory.display()))?;
        temp_file
            .write_all(contents)
            .and_then(|_| temp_file.as_file().sync_all())
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
        temp_file
            .persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}
