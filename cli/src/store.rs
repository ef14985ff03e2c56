use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pegjump_core::{ProgressStore, SavedProgress};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keeps campaign progress in a single JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    type Error = StoreError;

    fn load(&self) -> Result<SavedProgress, Self::Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no save at {}, starting fresh", self.path.display());
                return Ok(SavedProgress::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, progress: &SavedProgress) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, text)?;
        log::trace!("saved progress to {}", self.path.display());
        Ok(())
    }
}
