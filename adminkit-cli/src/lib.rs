//! Configuration-driven front end for adminkit.
//!
//! An [`AdminConfig`] (usually `adminkit.toml`) declares every admin object:
//! its kind, fields with validator rules, and editor layout. [`Registry::build`]
//! turns that into live handlers over one [`HostStore`](adminkit_storage::HostStore),
//! and [`execute`] runs a [`Command`] against the registry. The `adminkit`
//! binary is a thin clap wrapper around these pieces.

mod commands;
pub mod config;
mod error;
mod registry;

pub use commands::{Command, Format, Report, execute, outcome_json, parse_assignments};
pub use config::{AdminConfig, FieldConfig, ObjectConfig, ObjectKind, RuleConfig, SectionConfig, SidebarConfig};
pub use error::{AdminError, AdminResult, ConfigError, ConfigResult};
pub use registry::{AdminObject, ObjectHandler, Registry};
