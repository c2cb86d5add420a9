use adminkit_model::Value;
use regex_lite::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;

/// A field-level rule failure. Collected into an outcome, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// An error already attributed to `field`. The handler will not
    /// overwrite it.
    pub fn for_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Attributes the error to `field` unless it already names one.
    pub fn assign_field(&mut self, field: &str) -> &mut Self {
        if self.field.is_none() {
            self.field = Some(field.to_string());
        }
        self
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// A registered per-field rule.
pub type Validator = Box<dyn Fn(&Value) -> ValidationResult + Send + Sync>;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("valid email regex")
});

/// Built-in validators.
///
/// Each constructor returns a closure suitable for
/// `add_validator`. Rules that only make sense for one shape of value let
/// every other shape through, so `min_length` ignores numbers and `min`
/// ignores non-numeric text.
pub struct Validators;

impl Validators {
    /// Rejects `Null` and the empty string. `0`, `false` and `"0"` pass.
    pub fn required() -> impl Fn(&Value) -> ValidationResult + Send + Sync + 'static {
        |value: &Value| match value {
            Value::Null => Err(ValidationError::new("This field is required")),
            Value::String(s) if s.is_empty() => {
                Err(ValidationError::new("This field is required"))
            }
            _ => Ok(()),
        }
    }

    /// Strings shorter than `length` characters fail.
    pub fn min_length(length: usize) -> impl Fn(&Value) -> ValidationResult + Send + Sync + 'static {
        move |value: &Value| match value {
            Value::String(s) if s.chars().count() < length => Err(ValidationError::new(
                format!("Must be at least {length} characters"),
            )),
            _ => Ok(()),
        }
    }

    /// Strings longer than `length` characters fail.
    pub fn max_length(length: usize) -> impl Fn(&Value) -> ValidationResult + Send + Sync + 'static {
        move |value: &Value| match value {
            Value::String(s) if s.chars().count() > length => Err(ValidationError::new(
                format!("Must be no more than {length} characters"),
            )),
            _ => Ok(()),
        }
    }

    /// Numbers (and numeric strings) below `min` fail.
    pub fn min(min: f64) -> impl Fn(&Value) -> ValidationResult + Send + Sync + 'static {
        move |value: &Value| match value.as_number() {
            Some(n) if n < min => Err(ValidationError::new(format!("Must be at least {min}"))),
            _ => Ok(()),
        }
    }

    /// Numbers (and numeric strings) above `max` fail.
    pub fn max(max: f64) -> impl Fn(&Value) -> ValidationResult + Send + Sync + 'static {
        move |value: &Value| match value.as_number() {
            Some(n) if n > max => Err(ValidationError::new(format!("Must be no more than {max}"))),
            _ => Ok(()),
        }
    }

    /// Value must equal one of `allowed` exactly: `Int(1)` does not match
    /// `"1"` or `Float(1.0)`.
    pub fn one_of<I, V>(allowed: I) -> impl Fn(&Value) -> ValidationResult + Send + Sync + 'static
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
        let list = allowed
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(", ");
        move |value: &Value| {
            if allowed.contains(value) {
                Ok(())
            } else {
                Err(ValidationError::new(format!("Must be one of: {list}")))
            }
        }
    }

    /// Empty values pass; anything else must be a well-formed address.
    pub fn email() -> impl Fn(&Value) -> ValidationResult + Send + Sync + 'static {
        |value: &Value| {
            if !value.is_truthy() {
                return Ok(());
            }
            match value {
                Value::String(s) if EMAIL.is_match(s) => Ok(()),
                _ => Err(ValidationError::new("Invalid email address")),
            }
        }
    }
}
