//! FileStore: JSON-file-backed key-value backend
//!
//! The whole key space lives in one JSON document. It is read once on open
//! and rewritten after every mutation using the temp-file + rename pattern,
//! so a crash leaves either the previous or the new file, never a torn one.
//!
//! This is a convenience backend for small stores: every write costs a full
//! rewrite of the file.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info};

use cruddb_core::{Error, KeyValueStore, Result, Value};

/// File-backed backend
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, Value>>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty one if the file is missing
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a corruption error
    /// if it does not contain a JSON object of stored values.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str::<BTreeMap<String, Value>>(&content).map_err(|e| {
                    Error::corruption(format!(
                        "Failed to parse store file '{}': {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        info!(
            target: "cruddb::storage",
            path = %path.display(),
            keys = data.len(),
            "Opened file store"
        );

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn persist(&self, data: &BTreeMap<String, Value>) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec(data)?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &self.path)?;

        if let Some(parent) = self.path.parent() {
            if parent.exists() && !parent.as_os_str().is_empty() {
                let dir = File::open(parent)?;
                dir.sync_all()?;
            }
        }

        debug!(
            target: "cruddb::storage",
            path = %self.path.display(),
            bytes = bytes.len(),
            "Flushed file store"
        );
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut data = self.data.write();
        let previous = data.insert(key.to_string(), value);
        if let Err(e) = self.persist(&data) {
            // keep memory in step with the file that is still on disk
            match previous {
                Some(prev) => data.insert(key.to_string(), prev),
                None => data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut data = self.data.write();
        let Some(previous) = data.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&data) {
            data.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}
