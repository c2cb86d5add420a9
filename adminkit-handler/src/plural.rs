use adminkit_model::{Entity, EntityId, Record, Value};
use adminkit_object::PluralObject;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::outcome::Rejection;
use crate::{BaseHandler, FailureReason, HookError, Outcome, Payload, ValidationResult};

pub type BeforeCreateHook = Box<dyn Fn(Record) -> Result<Record, HookError> + Send + Sync>;
pub type AfterCreateHook = Box<dyn Fn(&Entity) + Send + Sync>;
/// Returning `false` cancels the delete.
pub type BeforeDeleteHook = Box<dyn Fn(&Entity) -> bool + Send + Sync>;
pub type AfterDeleteHook = Box<dyn Fn(EntityId) + Send + Sync>;

/// CRUD orchestration over a [`PluralObject`].
///
/// Every write runs the same pipeline: coerce the incoming fields through the
/// object's schema, validate them, let `before_*` hooks transform the data,
/// persist, then notify `after_*` hooks. Invalid input and vetoes stop the
/// pipeline before storage is touched. A `before_*` hook that returns a
/// [`HookError`] aborts the operation the same way; `after_*` hooks cannot
/// fail.
pub struct PluralHandler {
    object: PluralObject,
    base: BaseHandler<Entity>,
    before_create: Vec<BeforeCreateHook>,
    after_create: Vec<AfterCreateHook>,
    before_delete: Vec<BeforeDeleteHook>,
    after_delete: Vec<AfterDeleteHook>,
}

impl PluralHandler {
    pub fn new(object: PluralObject) -> Self {
        Self {
            object,
            base: BaseHandler::new(),
            before_create: Vec::new(),
            after_create: Vec::new(),
            before_delete: Vec::new(),
            after_delete: Vec::new(),
        }
    }

    pub fn object(&self) -> &PluralObject {
        &self.object
    }

    pub fn base(&self) -> &BaseHandler<Entity> {
        &self.base
    }

    // ── Registration ─────────────────────────────────────────────

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

    /// Runs in registration order; each hook receives the previous hook's output.
    pub fn before_create<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(Record) -> Result<Record, HookError> + Send + Sync + 'static,
    {
        self.before_create.push(Box::new(hook));
        self
    }

    pub fn after_create<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Entity) + Send + Sync + 'static,
    {
        self.after_create.push(Box::new(hook));
        self
    }

    /// Hooks see the stored entity, before the incoming changes are applied.
    pub fn before_update<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Entity, Record) -> Result<Record, HookError> + Send + Sync + 'static,
    {
        self.base.before_update(hook);
        self
    }

    pub fn after_update<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Entity) + Send + Sync + 'static,
    {
        self.base.after_update(hook);
        self
    }

    pub fn before_delete<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Entity) -> bool + Send + Sync + 'static,
    {
        self.before_delete.push(Box::new(hook));
        self
    }

    /// Hooks only get the id; the entity is already gone.
    pub fn after_delete<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(EntityId) + Send + Sync + 'static,
    {
        self.after_delete.push(Box::new(hook));
        self
    }

    // ── Operations ───────────────────────────────────────────────

    pub fn create(&mut self, data: Record) -> Outcome {
        let result = self.try_create(data);
        self.finish("create", None, result)
    }

    pub fn read(&self, id: EntityId) -> Outcome {
        let result = self.find(id).map(Payload::Entity);
        self.finish("read", Some(id), result)
    }

    pub fn list(&self) -> Outcome {
        let result = self
            .object
            .all()
            .map(Payload::Entities)
            .map_err(Rejection::from);
        self.finish("list", None, result)
    }

    pub fn update(&mut self, id: EntityId, data: Record) -> Outcome {
        let result = self.try_update(id, data);
        self.finish("update", Some(id), result)
    }

    pub fn delete(&mut self, id: EntityId) -> Outcome {
        let result = self.try_delete(id);
        self.finish("delete", Some(id), result)
    }

    fn try_create(&mut self, data: Record) -> Result<Payload, Rejection> {
        let mut data = self.checked(data)?;
        for hook in &self.before_create {
            data = hook(data)?;
        }

        let entity = self.object.create(data)?;
        for hook in &self.after_create {
            hook(&entity);
        }
        Ok(Payload::Entity(entity))
    }

    fn try_update(&mut self, id: EntityId, data: Record) -> Result<Payload, Rejection> {
        let mut entity = self.find(id)?;
        let data = self.checked(data)?;
        let data = self.base.run_before_update(&entity, data)?;

        for (field, value) in data {
            entity.set(field, value);
        }
        self.object.save(&entity)?;

        self.base.run_after_update(&entity);
        Ok(Payload::Entity(entity))
    }

    fn try_delete(&mut self, id: EntityId) -> Result<Payload, Rejection> {
        let entity = self.find(id)?;
        if self.before_delete.iter().any(|hook| !hook(&entity)) {
            return Err(Rejection::new(FailureReason::Cancelled));
        }

        self.object.delete(&entity)?;
        for hook in &self.after_delete {
            hook(id);
        }
        Ok(Payload::Empty)
    }

    fn find(&self, id: EntityId) -> Result<Entity, Rejection> {
        self.object
            .find(id)?
            .ok_or_else(|| Rejection::new(FailureReason::NotFound))
    }

    /// Coerce then validate.
    fn checked(&self, data: Record) -> Result<Record, Rejection> {
        let data = self.base.coerce(self.object.schema().map(Arc::as_ref), data);
        let errors = self.base.validate(&data);
        if errors.is_empty() {
            Ok(data)
        } else {
            Err(Rejection::invalid(errors))
        }
    }

    fn finish(
        &self,
        operation: &'static str,
        id: Option<EntityId>,
        result: Result<Payload, Rejection>,
    ) -> Outcome {
        let slug = self.object.slug();
        match &result {
            Ok(_) => debug!(
                object = %slug,
                operation,
                id = ?id.map(EntityId::get),
                "Request succeeded"
            ),
            Err(rejection) => warn!(
                object = %slug,
                operation,
                id = ?id.map(EntityId::get),
                reason = %rejection.reason(),
                "Request rejected"
            ),
        }
        Outcome::from(result)
    }
}

impl std::fmt::Debug for PluralHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralHandler")
            .field("object", &self.object)
            .field("base", &self.base)
            .field("before_create", &self.before_create.len())
            .field("after_create", &self.after_create.len())
            .field("before_delete", &self.before_delete.len())
            .field("after_delete", &self.after_delete.len())
            .finish()
    }
}

/// Former name of [`PluralHandler`].
#[deprecated(note = "use `PluralHandler`")]
pub type Handler = PluralHandler;
