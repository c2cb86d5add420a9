//! Storage contracts: SingularStorage, PluralStorage.

use adminkit_model::{EntityId, Record, Value};

use crate::StorageResult;

/// Backend for an object that has exactly one persistent record.
///
/// `set`/`get` work on an in-memory working copy. Nothing is persisted
/// until `save`, which writes the whole record; `load` replaces the
/// working copy with the persisted record.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn SingularStorage>`.
pub trait SingularStorage: Send + Sync {
    fn set(&mut self, slug: &str, value: Value);

    /// Returns `None` when the field was never set.
    fn get(&self, slug: &str) -> Option<Value>;

    fn load(&mut self) -> StorageResult<()>;

    fn save(&mut self) -> StorageResult<()>;
}

/// Backend for an id-keyed collection of records.
///
/// Every id-addressed operation is scoped to this collection: ids that
/// belong to another collection (or to nothing) make `update`/`delete` a
/// no-op and `find` return `Ok(None)`.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn PluralStorage>`.
pub trait PluralStorage: Send + Sync {
    /// Declares the collection with backend-specific settings.
    fn register(&mut self, slug: &str, settings: serde_json::Value) -> StorageResult<()>;

    /// Stores a new record and returns its freshly assigned id.
    fn insert(&mut self, data: &Record) -> StorageResult<EntityId>;

    /// Overwrites the record stored under `id`.
    fn update(&mut self, id: EntityId, data: &Record) -> StorageResult<()>;

    fn delete(&mut self, id: EntityId) -> StorageResult<()>;

    fn find(&self, id: EntityId) -> StorageResult<Option<Record>>;

    /// Full snapshot of the collection, in id order.
    fn all(&self) -> StorageResult<Vec<(EntityId, Record)>>;
}
