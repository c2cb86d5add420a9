use adminkit_model::{Entity, EntityId, Record, Schema};
use adminkit_storage::{CollectionStorage, PluralStorage};
use std::sync::Arc;
use tracing::debug;

use crate::{ObjectError, ObjectResult};

/// An object with zero or more id-keyed instances.
///
/// This layer does **not** coerce: `create` and `save` store field values
/// exactly as given, and hydrated entities carry whatever the backend
/// returned. Typed values are the request handler's job, so callers that
/// bypass the handler get untyped data back.
pub struct PluralObject {
    slug: String,
    schema: Option<Arc<Schema>>,
    storage: Box<dyn PluralStorage>,
}

impl PluralObject {
    pub fn new(slug: impl Into<String>, storage: Box<dyn PluralStorage>) -> Self {
        Self {
            slug: slug.into(),
            schema: None,
            storage,
        }
    }

    /// Backed by a private in-memory collection.
    pub fn in_memory(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let storage = CollectionStorage::in_memory(slug.clone());
        Self::new(slug, Box::new(storage))
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn set_schema(&mut self, schema: Arc<Schema>) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn storage(&self) -> &dyn PluralStorage {
        self.storage.as_ref()
    }

    /// Declares the backing collection.
    pub fn register(&mut self, settings: serde_json::Value) -> ObjectResult<()> {
        self.storage.register(&self.slug, settings)?;
        Ok(())
    }

    /// Inserts `data` and returns the new entity with its assigned id.
    pub fn create(&mut self, data: Record) -> ObjectResult<Entity> {
        let id = self.storage.insert(&data)?;
        debug!(object = %self.slug, id = %id, "Created entity");
        Ok(Entity::persisted(id, data))
    }

    pub fn find(&self, id: EntityId) -> ObjectResult<Option<Entity>> {
        Ok(self
            .storage
            .find(id)?
            .map(|data| Entity::persisted(id, data)))
    }

    /// Overwrites the stored record with the entity's full field map.
    pub fn save(&mut self, entity: &Entity) -> ObjectResult<()> {
        let id = entity.id().ok_or(ObjectError::Unsaved)?;
        self.storage.update(id, entity.data())?;
        debug!(object = %self.slug, id = %id, "Saved entity");
        Ok(())
    }

    pub fn delete(&mut self, entity: &Entity) -> ObjectResult<()> {
        let id = entity.id().ok_or(ObjectError::Unsaved)?;
        self.storage.delete(id)?;
        debug!(object = %self.slug, id = %id, "Deleted entity");
        Ok(())
    }

    /// Every stored record, hydrated fresh.
    pub fn all(&self) -> ObjectResult<Vec<Entity>> {
        Ok(self
            .storage
            .all()?
            .into_iter()
            .map(|(id, data)| Entity::persisted(id, data))
            .collect())
    }
}

impl std::fmt::Debug for PluralObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralObject")
            .field("slug", &self.slug)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
