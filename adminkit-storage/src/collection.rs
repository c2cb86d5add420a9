use adminkit_model::{EntityId, Record};
use tracing::{debug, warn};

use crate::{HostStore, PluralStorage, StorageResult};

/// Plural storage backed by the host's shared content table.
///
/// Rows of every collection live side by side in one table; this adapter
/// only ever sees rows tagged with its own collection slug.
#[derive(Debug, Clone)]
pub struct CollectionStorage {
    host: HostStore,
    slug: String,
}

impl CollectionStorage {
    pub fn new(host: HostStore, slug: impl Into<String>) -> Self {
        Self {
            host,
            slug: slug.into(),
        }
    }

    /// Standalone storage over a private in-memory host.
    pub fn in_memory(slug: impl Into<String>) -> Self {
        Self::new(HostStore::in_memory(), slug)
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn host(&self) -> &HostStore {
        &self.host
    }
}

impl PluralStorage for CollectionStorage {
    fn register(&mut self, slug: &str, settings: serde_json::Value) -> StorageResult<()> {
        if slug != self.slug {
            warn!(
                collection = %self.slug,
                requested = %slug,
                "Registering collection under a different slug than the adapter's"
            );
        }
        self.host.register_collection(slug, settings)?;
        debug!(collection = %slug, "Registered collection");
        Ok(())
    }

    fn insert(&mut self, data: &Record) -> StorageResult<EntityId> {
        let id = self.host.insert_row(&self.slug, data)?;
        debug!(collection = %self.slug, id = %id, "Inserted row");
        Ok(id)
    }

    fn update(&mut self, id: EntityId, data: &Record) -> StorageResult<()> {
        if !self.host.update_row(&self.slug, id, data)? {
            debug!(collection = %self.slug, id = %id, "Update ignored, id not in collection");
        }
        Ok(())
    }

    fn delete(&mut self, id: EntityId) -> StorageResult<()> {
        if !self.host.delete_row(&self.slug, id)? {
            debug!(collection = %self.slug, id = %id, "Delete ignored, id not in collection");
        }
        Ok(())
    }

    fn find(&self, id: EntityId) -> StorageResult<Option<Record>> {
        self.host.find_row(&self.slug, id)
    }

    fn all(&self) -> StorageResult<Vec<(EntityId, Record)>> {
        self.host.rows(&self.slug)
    }
}
