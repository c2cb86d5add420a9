//! Admin configuration loaded from `adminkit.toml`.
//!
//! ```toml
//! data_file = "admin-data.json"
//!
//! [[objects]]
//! slug = "book"
//! kind = "plural"
//! capability = "edit_posts"
//! settings = { label = "Books" }
//! fields = [
//!     { slug = "title", kind = "string", required = true, min_length = 3 },
//!     { slug = "pages", kind = "integer", min = 1 },
//!     { slug = "status", kind = "string", one_of = ["draft", "published"] },
//! ]
//!
//! [[objects.sections]]
//! label = "General"
//! columns = 2
//! fields = ["title", "pages"]
//!
//! [objects.sidebar]
//! fields = ["status"]
//! actions = ["save", "delete"]
//! ```

use adminkit_handler::{Validator, Validators};
use adminkit_model::{FieldKind, Schema, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::ConfigResult;

/// Whether an object has one instance or a collection of entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Singular,
    #[default]
    Plural,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Singular => f.write_str("singular"),
            ObjectKind::Plural => f.write_str("plural"),
        }
    }
}

/// Validator rules attached to one field. Every rule is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub one_of: Vec<Value>,
    #[serde(default)]
    pub email: bool,
}

impl RuleConfig {
    /// Builds the validators these rules describe, in a fixed order:
    /// required, lengths, bounds, allowed values, email.
    pub fn validators(&self) -> Vec<Validator> {
        let mut validators: Vec<Validator> = Vec::new();
        if self.required {
            validators.push(Box::new(Validators::required()));
        }
        if let Some(length) = self.min_length {
            validators.push(Box::new(Validators::min_length(length)));
        }
        if let Some(length) = self.max_length {
            validators.push(Box::new(Validators::max_length(length)));
        }
        if let Some(min) = self.min {
            validators.push(Box::new(Validators::min(min)));
        }
        if let Some(max) = self.max {
            validators.push(Box::new(Validators::max(max)));
        }
        if !self.one_of.is_empty() {
            validators.push(Box::new(Validators::one_of(self.one_of.clone())));
        }
        if self.email {
            validators.push(Box::new(Validators::email()));
        }
        validators
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub slug: String,
    #[serde(default = "default_field_kind")]
    pub kind: FieldKind,
    #[serde(flatten)]
    pub rules: RuleConfig,
}

fn default_field_kind() -> FieldKind {
    FieldKind::String
}

/// A top-level layout section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub label: String,
    #[serde(default)]
    pub columns: Option<u32>,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidebarConfig {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// One admin object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub slug: String,
    #[serde(default)]
    pub kind: ObjectKind,
    /// Capability recorded on the handler.
    #[serde(default)]
    pub capability: Option<String>,
    /// Collection settings passed to `register` (plural objects only).
    #[serde(default)]
    pub settings: toml::Table,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    /// Editor layout. Without sections every field goes into one section.
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub sidebar: Option<SidebarConfig>,
}

impl ObjectConfig {
    pub fn schema(&self) -> Schema {
        self.fields
            .iter()
            .fold(Schema::new(), |schema, field| schema.add_field(field.kind, &field.slug))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// JSON snapshot holding every object's data.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("adminkit-data.json")
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            objects: Vec::new(),
        }
    }
}

impl AdminConfig {
    /// Parses a configuration document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the default (empty) configuration with a
    /// warning. A file that exists but cannot be read or parsed is an error.
    /// A relative `data_file` is resolved against the config file's directory.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("No config file found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if config.data_file.is_relative()
            && let Some(dir) = path.parent()
        {
            config.data_file = dir.join(&config.data_file);
        }
        info!(
            objects = config.objects.len(),
            "Loaded admin configuration from {:?}", path
        );
        Ok(config)
    }

    pub fn object(&self, slug: &str) -> Option<&ObjectConfig> {
        self.objects.iter().find(|object| object.slug == slug)
    }
}
