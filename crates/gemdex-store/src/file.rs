//! Filesystem-backed key-value store.
//!
//! All keys live in one JSON document, `storage.json`, under the store root.
//! Writes are read-modify-write cycles under an exclusive lock on
//! `storage.lock` and land through a temp file and rename, so readers never
//! see a half-written document.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use gemdex_core::error::{Error, StoreError};
use gemdex_core::{KeyValueStore, Result};

const DOCUMENT_FILE: &str = "storage.json";
const LOCK_FILE: &str = "storage.lock";

fn map_io(err: std::io::Error) -> Error {
    Error::Store(StoreError::from(err))
}

/// Persistent store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store at the given root directory. Nothing is created on
    /// disk until the first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the JSON document holding every key.
    pub fn document_path(&self) -> PathBuf {
        self.root.join(DOCUMENT_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        let path = self.document_path();

        if !path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&path).map_err(map_io)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::Store(StoreError::Codec {
                key: DOCUMENT_FILE.to_string(),
                message: e.to_string(),
            })
        })
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        let path = self.document_path();
        let content = serde_json::to_string_pretty(document).map_err(|e| {
            Error::Store(StoreError::Codec {
                key: DOCUMENT_FILE.to_string(),
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(map_io)?;
        fs::rename(&temp_path, &path).map_err(map_io)?;

        Ok(())
    }

    fn lock(&self) -> Result<File> {
        fs::create_dir_all(&self.root).map_err(map_io)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        lock_file.lock_exclusive().map_err(map_io)?;
        Ok(lock_file)
    }

    /// Apply `change` to the document under the lock.
    fn update(&self, change: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let lock_file = self.lock()?;

        let result = self.read_document().and_then(|mut document| {
            change(&mut document);
            self.write_document(&document)
        });

        lock_file.unlock().map_err(map_io)?;
        result
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut document = self.read_document()?;
        Ok(document.remove(key))
    }

    #[instrument(skip(self, value), fields(root = %self.root.display()))]
    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.update(|document| {
            document.insert(key.to_string(), value);
        })?;
        debug!("Stored value");
        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn remove(&self, key: &str) -> Result<()> {
        if !self.document_path().exists() {
            return Ok(());
        }
        self.update(|document| {
            document.remove(key);
        })?;
        debug!("Removed value");
        Ok(())
    }
}
