use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::value::{Record, Value};

/// An identified record belonging to a plural object.
///
/// The id is `None` until the storage backend assigns one and cannot be
/// changed afterwards. Entities are never cached: every lookup hydrates a
/// fresh instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    data: Record,
}

impl Entity {
    /// A not-yet-persisted entity.
    pub fn new(data: Record) -> Self {
        Self { id: None, data }
    }

    /// An entity hydrated from storage.
    pub fn persisted(id: EntityId, data: Record) -> Self {
        Self { id: Some(id), data }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Reads a field. Missing fields read as `None`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(field.into(), value.into());
        self
    }

    pub fn data(&self) -> &Record {
        &self.data
    }

    /// Replaces the whole field map.
    pub fn set_data(&mut self, data: Record) -> &mut Self {
        self.data = data;
        self
    }

    pub fn into_data(self) -> Record {
        self.data
    }
}
