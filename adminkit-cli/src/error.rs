//! Error types for configuration loading and command execution.

use adminkit_layout::LayoutError;
use adminkit_object::ObjectError;
use thiserror::Error;

use crate::config::ObjectKind;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for registry and command operations.
pub type AdminResult<T> = Result<T, AdminError>;

/// Errors that can occur while reading an admin configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while wiring objects or running a command against them.
///
/// Expected request failures (invalid input, unknown ids) are not errors
/// here; they come back as a failed handler outcome.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("unknown object '{0}'")]
    UnknownObject(String),

    #[error("object '{0}' is configured more than once")]
    DuplicateObject(String),

    #[error("object '{slug}' is not {expected}")]
    WrongKind { slug: String, expected: ObjectKind },

    #[error("object '{0}' is plural; an --id is required")]
    MissingId(String),

    #[error("expected key=value, got '{0}'")]
    InvalidAssignment(String),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("object error: {0}")]
    Object(#[from] ObjectError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
