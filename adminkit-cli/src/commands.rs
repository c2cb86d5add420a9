//! Subcommands of the `adminkit` binary and their execution.

use adminkit_handler::{Outcome, Payload};
use adminkit_model::{EntityId, Record, Value};
use adminkit_render::{HtmlRenderer, JsonRenderer, Renderer};
use clap::{Subcommand, ValueEnum};
use serde_json::{Value as Json, json};
use tracing::{debug, info};

use crate::config::ObjectKind;
use crate::{AdminError, AdminResult, Registry};

/// Output format for rendered editors and tables.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Html,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every entity of a plural object
    List { object: String },

    /// Read one entity, or every value of a singular object
    Read {
        object: String,
        #[arg(long)]
        id: Option<EntityId>,
    },

    /// Create an entity from FIELD=VALUE pairs
    Create {
        object: String,
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },

    /// Update an entity, or a singular object, from FIELD=VALUE pairs
    Update {
        object: String,
        #[arg(long)]
        id: Option<EntityId>,
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },

    /// Delete an entity
    Delete {
        object: String,
        #[arg(long)]
        id: EntityId,
    },

    /// Render the editor form, empty or filled from an existing entity
    Editor {
        object: String,
        #[arg(long)]
        id: Option<EntityId>,
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },

    /// Render the list table of a plural object
    Table {
        object: String,
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },

    /// Print the layout tree as JSON
    Structure { object: String },
}

impl Command {
    /// Whether a successful run changes stored data.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Create { .. } | Command::Update { .. } | Command::Delete { .. }
        )
    }
}

/// What a command printed and whether the host needs persisting.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub output: String,
    pub success: bool,
    pub mutated: bool,
}

impl Report {
    fn document(output: String) -> Self {
        Self {
            output,
            success: true,
            mutated: false,
        }
    }

    fn outcome(outcome: &Outcome, mutates: bool) -> AdminResult<Self> {
        Ok(Self {
            output: serde_json::to_string_pretty(&outcome_json(outcome)?)?,
            success: outcome.is_success(),
            mutated: mutates && outcome.is_success(),
        })
    }
}

/// Runs `command` against the registry.
///
/// Handler failures are reported in the output with `success == false`;
/// only configuration-level problems (unknown object, wrong kind, malformed
/// input) come back as `Err`.
pub fn execute(registry: &mut Registry, command: &Command) -> AdminResult<Report> {
    debug!(?command, "Executing command");
    let mutates = command.mutates();

    match command {
        Command::List { object } => {
            let outcome = registry.get(object)?.plural()?.list();
            Report::outcome(&outcome, mutates)
        }
        Command::Read { object, id } => {
            let entry = registry.get_mut(object)?;
            let outcome = match entry.kind() {
                ObjectKind::Singular => entry.singular_mut()?.read(),
                ObjectKind::Plural => {
                    let id = id.ok_or_else(|| AdminError::MissingId(object.clone()))?;
                    entry.plural()?.read(id)
                }
            };
            Report::outcome(&outcome, mutates)
        }
        Command::Create { object, fields } => {
            let data = parse_assignments(fields)?;
            let outcome = registry.get_mut(object)?.plural_mut()?.create(data);
            Report::outcome(&outcome, mutates)
        }
        Command::Update { object, id, fields } => {
            let data = parse_assignments(fields)?;
            let entry = registry.get_mut(object)?;
            let outcome = match entry.kind() {
                ObjectKind::Singular => entry.singular_mut()?.update(data),
                ObjectKind::Plural => {
                    let id = id.ok_or_else(|| AdminError::MissingId(object.clone()))?;
                    entry.plural_mut()?.update(id, data)
                }
            };
            Report::outcome(&outcome, mutates)
        }
        Command::Delete { object, id } => {
            let outcome = registry.get_mut(object)?.plural_mut()?.delete(*id);
            Report::outcome(&outcome, mutates)
        }
        Command::Editor { object, id, format } => {
            let entry = registry.get_mut(object)?;
            let outcome = match (entry.kind(), id) {
                (ObjectKind::Singular, _) => entry.singular_mut()?.read(),
                (ObjectKind::Plural, Some(id)) => entry.plural()?.read(*id),
                (ObjectKind::Plural, None) => Outcome::Success(Payload::Data(Record::new())),
            };
            let data = match outcome.payload() {
                Some(Payload::Data(values)) => values.clone(),
                Some(Payload::Entity(entity)) => entity.data().clone(),
                _ => return Report::outcome(&outcome, mutates),
            };
            let output = renderer(*format).render_editor(entry.layout(), &data);
            info!(object = %object, "Rendered editor");
            Ok(Report::document(output))
        }
        Command::Table { object, format } => {
            let entry = registry.get(object)?;
            let outcome = entry.plural()?.list();
            if outcome.is_error() {
                return Report::outcome(&outcome, mutates);
            }
            let output = renderer(*format).render_list(entry.schema(), outcome.entities());
            info!(object = %object, rows = outcome.entities().len(), "Rendered table");
            Ok(Report::document(output))
        }
        Command::Structure { object } => {
            let structure = registry.get(object)?.layout().get_structure();
            Ok(Report::document(serde_json::to_string_pretty(&structure)?))
        }
    }
}

fn renderer(format: Format) -> Box<dyn Renderer> {
    match format {
        Format::Html => Box::new(HtmlRenderer::new()),
        Format::Json => Box::new(JsonRenderer::new().pretty()),
    }
}

/// Parses `field=value` arguments into raw request data.
///
/// Values stay strings; the handler coerces them to each field's kind.
/// Everything after the first `=` is the value, so values may contain `=`.
pub fn parse_assignments(pairs: &[String]) -> AdminResult<Record> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => {
                Ok((field.trim().to_string(), Value::from(value)))
            }
            _ => Err(AdminError::InvalidAssignment(pair.clone())),
        })
        .collect()
}

/// JSON view of a handler outcome:
/// `{"success": true, "data": ..}` or `{"success": false, "reason": .., "errors": [..]}`.
pub fn outcome_json(outcome: &Outcome) -> AdminResult<Json> {
    let document = match outcome {
        Outcome::Success(payload) => {
            let data = match payload {
                Payload::Empty => Json::Null,
                Payload::Entity(entity) => serde_json::to_value(entity)?,
                Payload::Entities(entities) => serde_json::to_value(entities)?,
                Payload::Data(values) => serde_json::to_value(values)?,
            };
            json!({ "success": true, "data": data })
        }
        Outcome::Failure { reason, errors } => {
            let errors = serde_json::to_value(errors)?;
            json!({ "success": false, "reason": reason.to_string(), "errors": errors })
        }
    };
    Ok(document)
}
