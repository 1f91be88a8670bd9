//! Write-through storage backed by a single JSON file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{Result, Storage, StoreError};

/// Keeps the whole map in memory and rewrites the file on every mutation.
///
/// A missing file starts empty. An unreadable or corrupted file also starts
/// empty (logged), so a damaged state file never blocks startup.
pub struct FileBackedStorage {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl FileBackedStorage {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => match serde_json::from_str(&text) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), "state file corrupted, starting empty: {e}");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&self.data)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        // tmp + rename so a crash mid-write leaves the previous file intact
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileBackedStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if self.data.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.keys().cloned().collect())
    }
}
