//! Rule program loading

use crate::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads the rule program from its backing file
#[derive(Debug, Clone)]
pub struct RuleLoader {
    path: PathBuf,
}

impl RuleLoader {
    /// Create a loader for `path`; nothing is read yet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole rule file as program text
    pub fn load_rules(&self) -> Result<String, StoreError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        info!(path = %self.path.display(), bytes = text.len(), "Loaded rules");
        Ok(text)
    }
}
