//! Small key/value side notes kept next to the address book.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Last EVM address seen by [`crate::normalize_address`], checksummed.
pub const ETH_STORAGE_KEY: &str = "ethAddress";

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt note file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub trait NoteStore {
    fn set_note(&mut self, key: &str, value: &str) -> Result<(), NoteError>;
    fn note(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryNotes {
    entries: BTreeMap<String, String>,
}

impl MemoryNotes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStore for MemoryNotes {
    fn set_note(&mut self, key: &str, value: &str) -> Result<(), NoteError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn note(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Notes persisted as a JSON object, rewritten on every update.
#[derive(Debug)]
pub struct FileNotes {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileNotes {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NoteError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), NoteError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&self.entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl NoteStore for FileNotes {
    fn set_note(&mut self, key: &str, value: &str) -> Result<(), NoteError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            tracing::warn!(path = %self.path.display(), key, "note not persisted: {err}");
            return Err(err);
        }
        Ok(())
    }

    fn note(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
