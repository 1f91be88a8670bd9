use std::collections::HashMap;

use catalog::{FileMap, ProblemRecord};
use indexmap::IndexSet;
use kvstore::Storage;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::keys::{
    draft_key, solution_key, DRAFT_PREFIX, KEY_FAVORITES, KEY_FILENAME, KEY_FINGERPRINT, KEY_PROBLEMS,
    KEY_SOLVED, SOLUTION_PREFIX,
};
use crate::{filter_records, Annotations, DatasetError, FilterState, Result, UploadedDataset};

/// Dataset as read back from storage.
#[derive(Clone, Debug, PartialEq)]
pub struct RestoredDataset {
    pub records: Vec<ProblemRecord>,
    pub file_name: Option<String>,
    pub fingerprint: Option<String>,
}

/// Authoritative record collection plus annotations.
///
/// Every mutation is written through to storage immediately as a whole-value
/// overwrite. Storage failures are logged and the in-memory state stays
/// authoritative for the rest of the session.
pub struct DatasetStore<S: Storage> {
    storage: S,
    records: Vec<ProblemRecord>,
    file_name: Option<String>,
    fingerprint: Option<String>,
    annotations: Annotations,
    solutions: HashMap<String, String>,
}

impl<S: Storage> DatasetStore<S> {
    /// Open over `storage`, restoring whatever dataset and annotations it holds.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            records: Vec::new(),
            file_name: None,
            fingerprint: None,
            annotations: Annotations::default(),
            solutions: HashMap::new(),
        };

        if let Some(restored) = store.restore_dataset() {
            store.records = restored.records;
            store.file_name = restored.file_name;
            store.fingerprint = restored.fingerprint;
        }
        store.annotations.favorites = read_json(&store.storage, KEY_FAVORITES).unwrap_or_default();
        store.annotations.solved = read_json(&store.storage, KEY_SOLVED).unwrap_or_default();
        store.restore_per_record();

        debug!(
            records = store.records.len(),
            favorites = store.annotations.favorites.len(),
            solved = store.annotations.solved.len(),
            "dataset store opened"
        );
        store
    }

    fn restore_per_record(&mut self) {
        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("could not list stored keys: {e}");
                return;
            }
        };

        for key in keys {
            if let Some(id) = key.strip_prefix(DRAFT_PREFIX) {
                if let Some(draft) = read_json::<FileMap, _>(&self.storage, &key) {
                    self.annotations.draft_patches.insert(id.to_string(), draft);
                }
            } else if let Some(id) = key.strip_prefix(SOLUTION_PREFIX) {
                match self.storage.get(&key) {
                    Ok(Some(text)) => {
                        self.solutions.insert(id.to_string(), text);
                    }
                    Ok(None) => {}
                    Err(e) => warn!(key = %key, "could not read saved solution: {e}"),
                }
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn records(&self) -> &[ProblemRecord] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.file_name.is_some() || !self.records.is_empty()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// First record with `id`, in dataset order.
    pub fn find(&self, id: &str) -> Option<&ProblemRecord> {
        self.records.iter().find(|p| p.id == id)
    }

    // ---------------- Dataset ---------------- //

    /// Replace the current dataset with a freshly read upload and persist it.
    pub fn install(&mut self, upload: UploadedDataset) -> &[ProblemRecord] {
        let UploadedDataset { file_name, fingerprint, report } = upload;

        self.persist_dataset(&report.records, &file_name, Some(&fingerprint));
        self.records = report.records;
        self.file_name = Some(file_name);
        self.fingerprint = Some(fingerprint);

        info!(
            file = self.file_name.as_deref().unwrap_or_default(),
            records = self.records.len(),
            skipped = report.parse_errors,
            "dataset installed"
        );
        &self.records
    }

    /// Write the full record collection and its file name.
    pub fn persist_dataset(&mut self, records: &[ProblemRecord], file_name: &str, fingerprint: Option<&str>) {
        write_json(&mut self.storage, KEY_PROBLEMS, records);
        write_raw(&mut self.storage, KEY_FILENAME, file_name);
        match fingerprint {
            Some(fp) => write_raw(&mut self.storage, KEY_FINGERPRINT, fp),
            None => remove(&mut self.storage, KEY_FINGERPRINT),
        }
    }

    /// Persisted dataset, or `None` when absent or unreadable.
    pub fn restore_dataset(&self) -> Option<RestoredDataset> {
        self.try_restore_dataset().unwrap_or_else(|e| {
            warn!("stored dataset unreadable, treating as absent: {e}");
            None
        })
    }

    /// Like [`restore_dataset`](Self::restore_dataset) but reports why the
    /// collection could not be read.
    pub fn try_restore_dataset(&self) -> Result<Option<RestoredDataset>> {
        let Some(records) = try_read_records(&self.storage)? else { return Ok(None) };
        Ok(Some(RestoredDataset {
            records,
            file_name: read_raw(&self.storage, KEY_FILENAME),
            fingerprint: read_raw(&self.storage, KEY_FINGERPRINT),
        }))
    }

    /// Back to the pre-upload state. Annotations are kept.
    pub fn clear_dataset(&mut self) {
        remove(&mut self.storage, KEY_PROBLEMS);
        remove(&mut self.storage, KEY_FILENAME);
        remove(&mut self.storage, KEY_FINGERPRINT);
        self.records.clear();
        self.file_name = None;
        self.fingerprint = None;
    }

    // ---------------- Favorites / solved ---------------- //

    pub fn is_favorite(&self, id: &str) -> bool {
        self.annotations.is_favorite(id)
    }

    pub fn is_solved(&self, id: &str) -> bool {
        self.annotations.is_solved(id)
    }

    pub fn set_favorite(&mut self, id: &str, on: bool) {
        set_membership(&mut self.annotations.favorites, id, on);
        write_json(&mut self.storage, KEY_FAVORITES, &self.annotations.favorites);
    }

    pub fn set_solved(&mut self, id: &str, on: bool) {
        set_membership(&mut self.annotations.solved, id, on);
        write_json(&mut self.storage, KEY_SOLVED, &self.annotations.solved);
    }

    /// Flip and return the new state.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let on = !self.is_favorite(id);
        self.set_favorite(id, on);
        on
    }

    pub fn toggle_solved(&mut self, id: &str) -> bool {
        let on = !self.is_solved(id);
        self.set_solved(id, on);
        on
    }

    // ---------------- Drafts / solutions ---------------- //

    /// Draft texts typed into empty patch slots of one record.
    pub fn draft_patch(&self, record_id: &str) -> FileMap {
        self.annotations.draft_patch(record_id).cloned().unwrap_or_default()
    }

    /// Every edit lands in storage before returning.
    pub fn set_draft_patch_file(&mut self, record_id: &str, filename: &str, content: &str) {
        let draft = self.annotations.draft_patches.entry(record_id.to_string()).or_default();
        draft.insert(filename.to_string(), content.to_string());
        write_json(&mut self.storage, &draft_key(record_id), draft);
    }

    /// Saves a free-text solution; blank text is ignored and returns `false`.
    pub fn save_solution(&mut self, record_id: &str, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        write_raw(&mut self.storage, &solution_key(record_id), text);
        self.solutions.insert(record_id.to_string(), text.to_string());
        true
    }

    pub fn load_solution(&self, record_id: &str) -> Option<&str> {
        self.solutions.get(record_id).map(String::as_str)
    }

    // ---------------- Views ---------------- //

    pub fn filter(&self, filter: &FilterState) -> Vec<&ProblemRecord> {
        filter_records(&self.records, filter, &self.annotations)
    }

    pub fn favorites(&self) -> &IndexSet<String> {
        &self.annotations.favorites
    }

    pub fn solved(&self) -> &IndexSet<String> {
        &self.annotations.solved
    }
}

fn set_membership(set: &mut IndexSet<String>, id: &str, on: bool) {
    if on {
        set.insert(id.to_string());
    } else {
        set.shift_remove(id);
    }
}

fn try_read_raw<S: Storage>(storage: &S, key: &str) -> Result<Option<String>> {
    Ok(storage.get(key)?)
}

fn try_read_json<T: DeserializeOwned, S: Storage>(storage: &S, key: &str) -> Result<Option<T>> {
    let Some(text) = try_read_raw(storage, key)? else { return Ok(None) };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| DatasetError::Serialization { key: key.to_string(), source })
}

fn try_write_json<S: Storage, T: Serialize + ?Sized>(storage: &mut S, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)
        .map_err(|source| DatasetError::Serialization { key: key.to_string(), source })?;
    storage.put(key, &text)?;
    Ok(())
}

/// Persisted records, one at a time: an entry that is not an object is
/// dropped instead of discarding the whole collection.
fn try_read_records<S: Storage>(storage: &S) -> Result<Option<Vec<ProblemRecord>>> {
    let Some(entries) = try_read_json::<Vec<Value>, _>(storage, KEY_PROBLEMS)? else { return Ok(None) };
    let mut records = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ProblemRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!(index = i, "dropping unreadable stored record: {e}"),
        }
    }
    Ok(Some(records))
}

fn read_raw<S: Storage>(storage: &S, key: &str) -> Option<String> {
    try_read_raw(storage, key).unwrap_or_else(|e| {
        warn!(key, "storage read failed, treating as absent: {e}");
        None
    })
}

fn read_json<T: DeserializeOwned, S: Storage>(storage: &S, key: &str) -> Option<T> {
    try_read_json(storage, key).unwrap_or_else(|e| {
        warn!(key, "stored value unreadable, treating as absent: {e}");
        None
    })
}

fn write_raw<S: Storage>(storage: &mut S, key: &str, value: &str) {
    if let Err(e) = storage.put(key, value) {
        warn!(key, "storage write failed: {e}");
    }
}

fn write_json<S: Storage, T: Serialize + ?Sized>(storage: &mut S, key: &str, value: &T) {
    if let Err(e) = try_write_json(storage, key, value) {
        warn!(key, "storage write failed: {e}");
    }
}

fn remove<S: Storage>(storage: &mut S, key: &str) {
    if let Err(e) = storage.delete(key) {
        warn!(key, "storage delete failed: {e}");
    }
}
