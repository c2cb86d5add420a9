use adminkit_model::{Schema, Value};
use adminkit_storage::{OptionStorage, SingularStorage};
use std::sync::Arc;

use crate::ObjectResult;

/// An object with exactly one persistent instance.
///
/// `set` only touches the storage's working copy; call [`save`](Self::save)
/// to persist and [`load`](Self::load) to refresh from the backend.
pub struct SingularObject {
    slug: String,
    schema: Option<Arc<Schema>>,
    storage: Box<dyn SingularStorage>,
}

impl SingularObject {
    pub fn new(slug: impl Into<String>, storage: Box<dyn SingularStorage>) -> Self {
        Self {
            slug: slug.into(),
            schema: None,
            storage,
        }
    }

    /// Backed by a private in-memory option.
    pub fn in_memory(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let storage = OptionStorage::in_memory(slug.clone());
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

    pub fn storage(&self) -> &dyn SingularStorage {
        self.storage.as_ref()
    }

    /// Coerces `value` to the field's kind and stages it.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        let value = self.coerce(field, value.into());
        self.storage.set(field, value);
    }

    /// Reads a staged or loaded value, coerced to the field's kind.
    ///
    /// A declared field that was never set reads as its kind's empty value
    /// (`""`, `0` or `false`). Undeclared fields that were never set read
    /// as `None`.
    pub fn get(&self, field: &str) -> Option<Value> {
        match self.storage.get(field) {
            Some(value) => Some(self.coerce(field, value)),
            None if self.declares(field) => Some(self.coerce(field, Value::Null)),
            None => None,
        }
    }

    pub fn load(&mut self) -> ObjectResult<()> {
        self.storage.load()?;
        Ok(())
    }

    pub fn save(&mut self) -> ObjectResult<()> {
        self.storage.save()?;
        Ok(())
    }

    fn declares(&self, field: &str) -> bool {
        self.schema.as_ref().is_some_and(|schema| schema.has_field(field))
    }

    fn coerce(&self, field: &str, value: Value) -> Value {
        match &self.schema {
            Some(schema) => schema.coerce(field, value),
            None => value,
        }
    }
}

impl std::fmt::Debug for SingularObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingularObject")
            .field("slug", &self.slug)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
