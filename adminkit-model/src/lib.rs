//! Data definition layer for adminkit.
//!
//! Defines the types every other layer is built on:
//! - [`Schema`]: ordered field slugs with a primitive [`FieldKind`] each
//! - [`Value`]: a single field value (the tagged union coercion works on)
//! - [`Record`]: an insertion-ordered field → value map
//! - [`Entity`]: an identified record belonging to a plural object
//! - [`EntityId`]: the backend-assigned identity of an entity
//!
//! Schemas are built once at configuration time and shared read-only
//! (usually behind an `Arc`) by data objects, layouts, renderers and
//! request handlers.

mod entity;
mod ids;
mod schema;
mod value;

pub use entity::Entity;
pub use ids::EntityId;
pub use schema::{FieldDef, FieldKind, Schema};
pub use value::{Record, Value};
