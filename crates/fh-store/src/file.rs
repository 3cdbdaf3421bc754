use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// File-backed profile store.
///
/// The whole profile is a single JSON object of string values. It is loaded
/// once on [`open`](Self::open) and rewritten after every mutation: the new
/// document goes to a sibling `.tmp` file which is then renamed over the
/// original, so a crash leaves either the old or the new profile on disk.
///
/// Two processes writing the same profile concurrently are not coordinated;
/// the last rename wins.
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Open (or create) the profile at `path`.
    ///
    /// A missing file is an empty profile; nothing is written until the first
    /// mutation.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::CorruptProfile {
                path: path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened profile store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the profile document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let encoded =
            serde_json::to_vec_pretty(entries).map_err(|e| StoreError::Serialization {
                key: "<profile>".into(),
                reason: e.to_string(),
            })?;

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&encoded)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut map = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let previous = map.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&map) {
            // Keep memory and disk in agreement when the write fails.
            match previous {
                Some(old) => map.insert(key.to_string(), old),
                None => map.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let Some(previous) = map.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&map) {
            map.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let map = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.keys().cloned().collect())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut map = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let previous = std::mem::take(&mut *map);
        if let Err(e) = self.persist(&map) {
            *map = previous;
            return Err(e);
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileKeyValueStore")
            .field("path", &self.path)
            .finish()
    }
}
