use adminkit_model::{Record, Value};
use adminkit_object::SingularObject;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::outcome::Rejection;
use crate::{BaseHandler, HookError, Outcome, Payload, ValidationResult};

/// Read/update orchestration over a [`SingularObject`].
///
/// A singular object always exists, so there is no create or delete. Both
/// operations answer with the object's full field map (one entry per schema
/// field, the kind's empty value where nothing is stored), never an entity. Update hooks see
/// that same map.
pub struct SingularHandler {
    object: SingularObject,
    base: BaseHandler<Record>,
}

impl SingularHandler {
    pub fn new(object: SingularObject) -> Self {
        Self {
            object,
            base: BaseHandler::new(),
        }
    }

    pub fn object(&self) -> &SingularObject {
        &self.object
    }

    pub fn base(&self) -> &BaseHandler<Record> {
        &self.base
    }

    pub fn add_validator<F>(&mut self, field: impl Into<String>, validator: F) -> &mut Self
    where
        F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
    {
        self.base.add_validator(field, validator);
        self
    }

    pub fn set_capability(&mut self, capability: impl Into<String>) -> &mut Self {
        self.base.set_capability(capability);
        self
    }

    /// Hooks receive `(current values, incoming data)` and return the data
    /// to apply.
    pub fn before_update<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Record, Record) -> Result<Record, HookError> + Send + Sync + 'static,
    {
        self.base.before_update(hook);
        self
    }

    /// Hooks receive the values as saved.
    pub fn after_update<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        self.base.after_update(hook);
        self
    }

    /// Reloads from storage and returns every field value.
    pub fn read(&mut self) -> Outcome {
        let result = self
            .object
            .load()
            .map(|()| Payload::Data(self.values()))
            .map_err(Rejection::from);
        self.finish("read", result)
    }

    pub fn update(&mut self, data: Record) -> Outcome {
        let result = self.try_update(data);
        self.finish("update", result)
    }

    fn try_update(&mut self, data: Record) -> Result<Payload, Rejection> {
        let schema = self.object.schema().map(Arc::as_ref);
        let data = self.base.coerce(schema, data);
        let errors = self.base.validate(&data);
        if !errors.is_empty() {
            return Err(Rejection::invalid(errors));
        }

        let current = self.values();
        let data = self.base.run_before_update(&current, data)?;

        for (field, value) in data {
            self.object.set(&field, value);
        }
        if let Err(err) = self.object.save() {
            self.discard_staged();
            return Err(err.into());
        }

        let updated = self.values();
        self.base.run_after_update(&updated);
        Ok(Payload::Data(updated))
    }

    /// Drops values staged by a failed update so they never become "current".
    fn discard_staged(&mut self) {
        if let Err(err) = self.object.load() {
            warn!(object = %self.object.slug(), error = %err, "Failed to discard staged values");
        }
    }

    /// One entry per schema field, in declaration order.
    fn values(&self) -> Record {
        let Some(schema) = self.object.schema() else {
            return Record::new();
        };
        schema
            .slugs()
            .map(|slug| (slug.to_string(), self.object.get(slug).unwrap_or_default()))
            .collect()
    }

    fn finish(&self, operation: &'static str, result: Result<Payload, Rejection>) -> Outcome {
        let slug = self.object.slug();
        match &result {
            Ok(_) => debug!(object = %slug, operation, "Request succeeded"),
            Err(rejection) => warn!(
                object = %slug,
                operation,
                reason = %rejection.reason(),
                "Request rejected"
            ),
        }
        Outcome::from(result)
    }
}

impl std::fmt::Debug for SingularHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingularHandler")
            .field("object", &self.object)
            .field("base", &self.base)
            .finish()
    }
}
