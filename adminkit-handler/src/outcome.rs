use adminkit_model::{Entity, Record};
use adminkit_object::ObjectError;
use thiserror::Error;

use crate::{HookError, ValidationError};

/// What a successful operation hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Operations with nothing to return, e.g. a delete.
    Empty,
    Entity(Entity),
    Entities(Vec<Entity>),
    /// The full field map of a singular object.
    Data(Record),
}

/// Why an operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("validation failed")]
    Invalid,

    #[error("not found")]
    NotFound,

    /// A `before_delete` hook vetoed the operation.
    #[error("cancelled by hook")]
    Cancelled,

    #[error("hook failed: {0}")]
    Hook(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Result of one handler operation.
///
/// Exactly one of [`is_success`](Self::is_success) and
/// [`is_error`](Self::is_error) holds. Expected failures (invalid input,
/// unknown ids, vetoes) come back as `Failure`, never as a panic or `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Payload),
    Failure {
        reason: FailureReason,
        errors: Vec<ValidationError>,
    },
}

impl Outcome {
    pub fn failure(reason: FailureReason) -> Self {
        Self::Failure {
            reason,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self::Failure {
            reason: FailureReason::Invalid,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn entity(&self) -> Option<&Entity> {
        match self.payload() {
            Some(Payload::Entity(entity)) => Some(entity),
            _ => None,
        }
    }

    /// Listed entities; empty for any other payload.
    pub fn entities(&self) -> &[Entity] {
        match self.payload() {
            Some(Payload::Entities(entities)) => entities,
            _ => &[],
        }
    }

    pub fn data(&self) -> Option<&Record> {
        match self.payload() {
            Some(Payload::Data(data)) => Some(data),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Failure { reason, .. } => Some(reason),
            Self::Success(_) => None,
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Failure { errors, .. } => errors,
            Self::Success(_) => &[],
        }
    }

    pub fn field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors()
            .iter()
            .filter(|e| e.field() == Some(field))
            .collect()
    }
}

/// Internal short-circuit type so pipelines can use `?`.
#[derive(Debug)]
pub(crate) struct Rejection {
    reason: FailureReason,
    errors: Vec<ValidationError>,
}

impl Rejection {
    pub(crate) fn new(reason: FailureReason) -> Self {
        Self {
            reason,
            errors: Vec::new(),
        }
    }

    pub(crate) fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            reason: FailureReason::Invalid,
            errors,
        }
    }

    pub(crate) fn reason(&self) -> &FailureReason {
        &self.reason
    }
}

impl From<ObjectError> for Rejection {
    fn from(err: ObjectError) -> Self {
        Self::new(FailureReason::Storage(err.to_string()))
    }
}

impl From<HookError> for Rejection {
    fn from(err: HookError) -> Self {
        Self::new(FailureReason::Hook(err.to_string()))
    }
}

impl From<Result<Payload, Rejection>> for Outcome {
    fn from(result: Result<Payload, Rejection>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(rejection) => Self::Failure {
                reason: rejection.reason,
                errors: rejection.errors,
            },
        }
    }
}
