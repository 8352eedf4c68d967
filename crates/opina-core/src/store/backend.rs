//! Injectable persistence behind every store.
//!
//! Each store owns an `Arc<dyn StorageBackend>` and treats its keys as
//! exclusively owned. `MemoryBackend` backs tests and in-process demo use;
//! `FileBackend` persists one `<key>.json` file per key under a data
//! directory, writing through a temp file so a crash mid-write never leaves
//! a torn blob behind.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read key {key}: {source}")]
    Read { key: String, source: io::Error },
    #[error("failed to write key {key}: {source}")]
    Write { key: String, source: io::Error },
    #[error("failed to remove key {key}: {source}")]
    Remove { key: String, source: io::Error },
}

/// String-keyed blob storage. Keys never collide across stores.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Result of decoding a persisted collection.
///
/// Distinguishes "nothing yet" from "data present but unreadable"; the
/// plain `load*` accessors on each store collapse both to the empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Empty,
    Corrupt,
}

impl<T> LoadOutcome<T> {
    pub fn loaded_or(self, default: T) -> T {
        match self {
            LoadOutcome::Loaded(value) => value,
            LoadOutcome::Empty | LoadOutcome::Corrupt => default,
        }
    }
}

/// In-memory backend for tests and demo sessions.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// One JSON file per key under `data_dir`.
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> io::Result<Self> {
        std::fs::create_dir_all(data_dir.as_ref())?;
        Ok(Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let target = self.key_path(key);
        let temp = target.with_extension("json.tmp");

        let wrap = |source: io::Error| StorageError::Write {
            key: key.to_string(),
            source,
        };
        std::fs::write(&temp, value).map_err(wrap)?;
        std::fs::rename(&temp, &target).map_err(wrap)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Remove {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}
