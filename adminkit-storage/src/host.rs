//! Reference host backend: a shared option table plus a shared content table.

use adminkit_model::{EntityId, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::{CollectionStorage, OptionStorage, StorageError, StorageResult};

/// One row of the content table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentRow {
    id: EntityId,
    collection: String,
    data: Record,
}

/// Everything the host persists. This is also the on-disk snapshot format.
#[derive(Debug, Serialize, Deserialize)]
struct HostState {
    #[serde(default)]
    options: BTreeMap<String, Record>,
    #[serde(default)]
    collections: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    rows: Vec<ContentRow>,
    #[serde(default = "first_id")]
    next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            options: BTreeMap::new(),
            collections: BTreeMap::new(),
            rows: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl HostState {
    /// Moves `next_id` past every stored row, so a snapshot with a stale or
    /// missing counter never re-issues an id.
    fn reconcile_next_id(&mut self) {
        let after_rows = self.rows.iter().map(|row| row.id.get() + 1).max().unwrap_or(1);
        self.next_id = self.next_id.max(after_rows);
    }
}

/// Cloneable handle to the host platform's persistence.
///
/// All clones share the same state. Ids come from one sequence shared by
/// every collection, so an id is never reused across collections.
#[derive(Debug, Clone, Default)]
pub struct HostStore {
    state: Arc<Mutex<HostState>>,
    path: Option<PathBuf>,
}

impl HostStore {
    /// A host that lives only as long as its handles.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens a snapshot-backed host. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let mut state: HostState = serde_json::from_str(&contents)?;
            state.reconcile_next_id();
            info!(path = %path.display(), rows = state.rows.len(), "Loaded host snapshot");
            state
        } else {
            debug!(path = %path.display(), "No host snapshot yet, starting empty");
            HostState::default()
        };
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            path: Some(path),
        })
    }

    /// Snapshot file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the snapshot file. In-memory hosts do nothing.
    ///
    /// The file is replaced atomically (write to a sibling, then rename).
    pub fn persist(&self) -> StorageResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = {
            let state = self.lock()?;
            serde_json::to_string_pretty(&*state)?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        debug!(path = %path.display(), "Persisted host snapshot");
        Ok(())
    }

    /// Singular adapter for the option stored under `slug`.
    pub fn option_storage(&self, slug: impl Into<String>) -> OptionStorage {
        OptionStorage::new(self.clone(), slug)
    }

    /// Plural adapter for the collection named `slug`.
    pub fn collection_storage(&self, slug: impl Into<String>) -> CollectionStorage {
        CollectionStorage::new(self.clone(), slug)
    }

    /// Persisted value of an option, if it was ever saved.
    pub fn option(&self, slug: &str) -> StorageResult<Option<Record>> {
        Ok(self.lock()?.options.get(slug).cloned())
    }

    pub fn set_option(&self, slug: &str, values: Record) -> StorageResult<()> {
        self.lock()?.options.insert(slug.to_string(), values);
        Ok(())
    }

    /// Settings a collection was registered with.
    pub fn collection_settings(&self, slug: &str) -> StorageResult<Option<serde_json::Value>> {
        Ok(self.lock()?.collections.get(slug).cloned())
    }

    pub fn is_registered(&self, slug: &str) -> StorageResult<bool> {
        Ok(self.lock()?.collections.contains_key(slug))
    }

    pub(crate) fn register_collection(
        &self,
        slug: &str,
        settings: serde_json::Value,
    ) -> StorageResult<()> {
        self.lock()?.collections.insert(slug.to_string(), settings);
        Ok(())
    }

    pub(crate) fn insert_row(&self, collection: &str, data: &Record) -> StorageResult<EntityId> {
        let mut state = self.lock()?;
        let id = EntityId::new(state.next_id);
        state.next_id += 1;
        state.rows.push(ContentRow {
            id,
            collection: collection.to_string(),
            data: data.clone(),
        });
        Ok(id)
    }

    /// Returns whether a row of `collection` was replaced.
    pub(crate) fn update_row(
        &self,
        collection: &str,
        id: EntityId,
        data: &Record,
    ) -> StorageResult<bool> {
        let mut state = self.lock()?;
        match state
            .rows
            .iter_mut()
            .find(|row| row.id == id && row.collection == collection)
        {
            Some(row) => {
                row.data = data.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns whether a row of `collection` was removed.
    pub(crate) fn delete_row(&self, collection: &str, id: EntityId) -> StorageResult<bool> {
        let mut state = self.lock()?;
        let before = state.rows.len();
        state
            .rows
            .retain(|row| !(row.id == id && row.collection == collection));
        Ok(state.rows.len() != before)
    }

    pub(crate) fn find_row(&self, collection: &str, id: EntityId) -> StorageResult<Option<Record>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .find(|row| row.id == id && row.collection == collection)
            .map(|row| row.data.clone()))
    }

    pub(crate) fn rows(&self, collection: &str) -> StorageResult<Vec<(EntityId, Record)>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .filter(|row| row.collection == collection)
            .map(|row| (row.id, row.data.clone()))
            .collect())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, HostState>> {
        self.state.lock().map_err(|_| StorageError::Poisoned)
    }
}
