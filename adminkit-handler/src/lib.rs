//! Request handling for adminkit data objects.
//!
//! Handlers sit between an admin entry point and a data object. Every write
//! goes through one pipeline:
//!
//! ```text
//! coerce -> validate -> before hooks -> persist -> after hooks
//! ```
//!
//! and every operation answers with an [`Outcome`], so expected failures
//! (invalid input, unknown ids, vetoed deletes) never surface as Rust errors.
//! Validation failures are collected across all fields, letting a form
//! report every problem in one round trip.
//!
//! ```
//! use adminkit_handler::{PluralHandler, Validators};
//! use adminkit_model::{Record, Schema, Value};
//! use adminkit_object::PluralObject;
//! use std::sync::Arc;
//!
//! let schema = Arc::new(Schema::new().string("title").integer("count"));
//! let mut handler = PluralHandler::new(PluralObject::in_memory("book").with_schema(schema));
//! handler.add_validator("title", Validators::min_length(3));
//!
//! let mut data = Record::new();
//! data.insert("title".into(), Value::from("Dune"));
//! data.insert("count".into(), Value::from("5"));
//!
//! let outcome = handler.create(data);
//! assert!(outcome.is_success());
//! assert_eq!(outcome.entity().unwrap().get("count"), Some(&Value::Int(5)));
//! ```

mod base;
mod error;
mod outcome;
mod plural;
mod singular;
mod validation;

pub use base::{AfterHook, BaseHandler, BeforeUpdateHook};
pub use error::HookError;
pub use outcome::{FailureReason, Outcome, Payload};
#[allow(deprecated)]
pub use plural::Handler;
pub use plural::{AfterCreateHook, AfterDeleteHook, BeforeCreateHook, BeforeDeleteHook, PluralHandler};
pub use singular::SingularHandler;
pub use validation::{ValidationError, ValidationResult, Validator, Validators};
