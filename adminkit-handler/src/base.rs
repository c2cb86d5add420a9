use adminkit_model::{Record, Schema, Value};
use indexmap::IndexMap;
use tracing::debug;

use crate::{HookError, ValidationError, ValidationResult, Validator};

/// `before_update` hook: sees the current subject and the incoming data and
/// returns the data to apply.
pub type BeforeUpdateHook<S> = Box<dyn Fn(&S, Record) -> Result<Record, HookError> + Send + Sync>;

/// Side-effect-only hook run after a successful write.
pub type AfterHook<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Behavior shared by plural and singular handlers.
///
/// `S` is what update hooks see: an [`Entity`](adminkit_model::Entity) for
/// plural objects, the full field map for singular ones.
pub struct BaseHandler<S> {
    validators: IndexMap<String, Vec<Validator>>,
    before_update: Vec<BeforeUpdateHook<S>>,
    after_update: Vec<AfterHook<S>>,
    capability: Option<String>,
}

impl<S> Default for BaseHandler<S> {
    fn default() -> Self {
        Self {
            validators: IndexMap::new(),
            before_update: Vec::new(),
            after_update: Vec::new(),
            capability: None,
        }
    }
}

impl<S> BaseHandler<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_validator<F>(&mut self, field: impl Into<String>, validator: F) -> &mut Self
    where
        F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
    {
        self.validators
            .entry(field.into())
            .or_default()
            .push(Box::new(validator));
        self
    }

    pub fn before_update<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&S, Record) -> Result<Record, HookError> + Send + Sync + 'static,
    {
        self.before_update.push(Box::new(hook));
        self
    }

    pub fn after_update<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.after_update.push(Box::new(hook));
        self
    }

    /// Records the capability required to use this handler. Not enforced.
    pub fn set_capability(&mut self, capability: impl Into<String>) -> &mut Self {
        let capability = capability.into();
        debug!(capability = %capability, "Capability recorded (not enforced)");
        self.capability = Some(capability);
        self
    }

    pub fn capability(&self) -> Option<&str> {
        self.capability.as_deref()
    }

    /// Number of validators registered for `field`.
    pub fn validator_count(&self, field: &str) -> usize {
        self.validators.get(field).map_or(0, Vec::len)
    }

    /// Maps every provided field through the schema. Without a schema the
    /// data is returned as is.
    pub fn coerce(&self, schema: Option<&Schema>, data: Record) -> Record {
        match schema {
            Some(schema) => schema.coerce_record(data),
            None => data,
        }
    }

    /// Runs each present field's validators in registration order and
    /// collects every failure. Fields absent from `data` are not checked.
    pub fn validate(&self, data: &Record) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (field, value) in data {
            let Some(validators) = self.validators.get(field) else {
                continue;
            };
            for validator in validators {
                if let Err(mut err) = validator(value) {
                    err.assign_field(field);
                    errors.push(err);
                }
            }
        }
        errors
    }

    pub(crate) fn run_before_update(
        &self,
        subject: &S,
        mut data: Record,
    ) -> Result<Record, HookError> {
        for hook in &self.before_update {
            data = hook(subject, data)?;
        }
        Ok(data)
    }

    pub(crate) fn run_after_update(&self, subject: &S) {
        for hook in &self.after_update {
            hook(subject);
        }
    }
}

impl<S> std::fmt::Debug for BaseHandler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseHandler")
            .field("validated_fields", &self.validators.keys().collect::<Vec<_>>())
            .field("before_update", &self.before_update.len())
            .field("after_update", &self.after_update.len())
            .field("capability", &self.capability)
            .finish()
    }
}
