//! Temporary data directories for tests. The directory is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::storage::Stores;

pub struct TestEnvironment {
    pub connection: CsvConnection,
    pub base_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    /// File-backed stores over this environment's directory
    pub fn stores(&self) -> Stores {
        Stores::csv(Arc::new(self.connection.clone()))
    }
}
