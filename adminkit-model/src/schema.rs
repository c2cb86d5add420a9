use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::{Record, Value};

/// The primitive kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub slug: String,
    pub kind: FieldKind,
}

/// Ordered set of field definitions (a "data set").
///
/// Built once with chained calls, then shared read-only:
///
/// ```rust
/// use adminkit_model::{FieldKind, Schema, Value};
///
/// let schema = Schema::new()
///     .string("title")
///     .integer("count")
///     .boolean("is_active");
///
/// assert_eq!(schema.kind_of("count"), Some(FieldKind::Integer));
/// assert_eq!(schema.coerce("count", Value::from("5")), Value::Int(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Redeclaring a slug replaces its kind and keeps
    /// the slug's original position.
    #[must_use]
    pub fn add_field(mut self, kind: FieldKind, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        match self.fields.iter_mut().find(|f| f.slug == slug) {
            Some(existing) => existing.kind = kind,
            None => self.fields.push(FieldDef { slug, kind }),
        }
        self
    }

    /// Shorthand for a string field.
    #[must_use]
    pub fn string(self, slug: impl Into<String>) -> Self {
        self.add_field(FieldKind::String, slug)
    }

    /// Shorthand for an integer field.
    #[must_use]
    pub fn integer(self, slug: impl Into<String>) -> Self {
        self.add_field(FieldKind::Integer, slug)
    }

    /// Shorthand for a boolean field.
    #[must_use]
    pub fn boolean(self, slug: impl Into<String>) -> Self {
        self.add_field(FieldKind::Boolean, slug)
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Declared slugs in declaration order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.slug.as_str())
    }

    pub fn kind_of(&self, slug: &str) -> Option<FieldKind> {
        self.fields.iter().find(|f| f.slug == slug).map(|f| f.kind)
    }

    pub fn has_field(&self, slug: &str) -> bool {
        self.kind_of(slug).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts `value` to the declared kind of `slug`.
    ///
    /// Unknown slugs pass the value through untouched.
    pub fn coerce(&self, slug: &str, value: Value) -> Value {
        match self.kind_of(slug) {
            None => value,
            Some(FieldKind::String) => match value {
                Value::String(_) => value,
                other => Value::String(other.to_text()),
            },
            Some(FieldKind::Integer) => Value::Int(value.to_integer()),
            Some(FieldKind::Boolean) => Value::Bool(value.to_boolean()),
        }
    }

    /// Coerces every entry of `data`, keeping its order.
    pub fn coerce_record(&self, data: Record) -> Record {
        data.into_iter()
            .map(|(slug, value)| {
                let coerced = self.coerce(&slug, value);
                (slug, coerced)
            })
            .collect()
    }
}
