use adminkit_model::{Record, Value};
use tracing::debug;

use crate::{HostStore, SingularStorage, StorageResult};

/// Singular storage backed by one entry of the host's option table.
///
/// Keeps a working copy of the record; `save` writes the whole copy back
/// under the option slug and `load` replaces the copy with what the host
/// has (an empty record if the option was never saved).
#[derive(Debug, Clone)]
pub struct OptionStorage {
    host: HostStore,
    slug: String,
    values: Record,
}

impl OptionStorage {
    pub fn new(host: HostStore, slug: impl Into<String>) -> Self {
        Self {
            host,
            slug: slug.into(),
            values: Record::new(),
        }
    }

    /// Standalone storage over a private in-memory host.
    pub fn in_memory(slug: impl Into<String>) -> Self {
        Self::new(HostStore::in_memory(), slug)
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The unsaved working copy.
    pub fn values(&self) -> &Record {
        &self.values
    }
}

impl SingularStorage for OptionStorage {
    fn set(&mut self, slug: &str, value: Value) {
        self.values.insert(slug.to_string(), value);
    }

    fn get(&self, slug: &str) -> Option<Value> {
        self.values.get(slug).cloned()
    }

    fn load(&mut self) -> StorageResult<()> {
        self.values = self.host.option(&self.slug)?.unwrap_or_default();
        debug!(option = %self.slug, fields = self.values.len(), "Loaded option");
        Ok(())
    }

    fn save(&mut self) -> StorageResult<()> {
        self.host.set_option(&self.slug, self.values.clone())?;
        debug!(option = %self.slug, fields = self.values.len(), "Saved option");
        Ok(())
    }
}
