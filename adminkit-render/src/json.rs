use adminkit_layout::{Condition, Field, Layout, Node, SidebarNode};
use adminkit_model::{Entity, Record, Schema, Value};
use serde_json::{Map, Value as Json, json};
use tracing::debug;

use crate::{ControlType, Renderer, capitalize};

/// JSON documents for front ends that draw their own controls.
///
/// Editors render as `{"form": {"items": [...], "sidebar": {...}}}` where
/// every field carries its `control`, `label` and current `value`. Lists
/// render as `{"columns": [...], "rows": [{"id": .., "values": {...}}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output instead of a single line.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn finish(&self, document: &Json) -> String {
        if self.pretty {
            format!("{document:#}")
        } else {
            document.to_string()
        }
    }
}

impl Renderer for JsonRenderer {
    fn render_editor(&self, layout: &Layout, data: &Record) -> String {
        let form = FormBuilder {
            schema: layout.schema(),
            data,
        };
        let mut body = Map::new();
        body.insert(
            "items".into(),
            Json::Array(layout.items().iter().map(|n| form.node(n)).collect()),
        );
        if let Some(sidebar) = layout.sidebar_node() {
            body.insert("sidebar".into(), form.sidebar(sidebar));
        }

        debug!(fields = layout.fields().len(), "Rendered JSON editor");
        self.finish(&json!({ "form": body }))
    }

    fn render_list(&self, schema: &Schema, entities: &[Entity]) -> String {
        let columns: Vec<&str> = schema.slugs().collect();
        let rows: Vec<Json> = entities
            .iter()
            .map(|entity| {
                let values: Map<String, Json> = columns
                    .iter()
                    .map(|slug| {
                        let value = entity.get(slug).map_or(Json::Null, to_json);
                        (slug.to_string(), value)
                    })
                    .collect();
                json!({ "id": entity.id().map(|id| id.get()), "values": values })
            })
            .collect();

        debug!(rows = rows.len(), columns = columns.len(), "Rendered JSON list");
        self.finish(&json!({ "columns": columns, "rows": rows }))
    }
}

/// Converts a field value to its JSON scalar. Non-finite floats become `null`.
fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(n) => Json::from(*n),
        Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
    }
}

fn condition_json(condition: &Condition) -> Json {
    json!({ "field": condition.field, "value": to_json(&condition.value) })
}

struct FormBuilder<'a> {
    schema: &'a Schema,
    data: &'a Record,
}

impl FormBuilder<'_> {
    fn node(&self, node: &Node) -> Json {
        match node {
            Node::Section(section) => {
                let mut out = Map::new();
                out.insert("type".into(), json!("section"));
                out.insert("label".into(), json!(section.label));
                out.insert("fields".into(), self.fields(&section.fields));
                if !section.items.is_empty() {
                    out.insert("items".into(), self.nodes(&section.items));
                }
                if let Some(columns) = section.columns {
                    out.insert("columns".into(), json!(columns));
                }
                if let Some(condition) = &section.condition {
                    out.insert("condition".into(), condition_json(condition));
                }
                Json::Object(out)
            }
            Node::Tabs(tabs) => {
                let tabs: Vec<Json> = tabs
                    .tabs
                    .iter()
                    .map(|tab| {
                        let mut out = Map::new();
                        out.insert("label".into(), json!(tab.label));
                        out.insert("fields".into(), self.fields(&tab.fields));
                        if !tab.items.is_empty() {
                            out.insert("items".into(), self.nodes(&tab.items));
                        }
                        Json::Object(out)
                    })
                    .collect();
                json!({ "type": "tabs", "tabs": tabs })
            }
        }
    }

    fn nodes(&self, nodes: &[Node]) -> Json {
        Json::Array(nodes.iter().map(|n| self.node(n)).collect())
    }

    fn sidebar(&self, sidebar: &SidebarNode) -> Json {
        let mut out = Map::new();
        out.insert("fields".into(), self.fields(&sidebar.fields));
        if !sidebar.actions.is_empty() {
            out.insert("actions".into(), json!(sidebar.actions));
        }
        Json::Object(out)
    }

    fn fields(&self, fields: &[Field]) -> Json {
        Json::Array(fields.iter().map(|f| self.field(f)).collect())
    }

    fn field(&self, field: &Field) -> Json {
        let control = ControlType::for_field(self.schema, &field.slug);
        let mut out = Map::new();
        out.insert("slug".into(), json!(field.slug));
        out.insert("label".into(), json!(capitalize(&field.slug)));
        out.insert("control".into(), json!(control.as_str()));
        out.insert(
            "value".into(),
            self.data.get(&field.slug).map_or(Json::Null, to_json),
        );
        if let Some(help) = &field.help {
            out.insert("help".into(), json!(help));
        }
        if let Some(placeholder) = &field.placeholder {
            out.insert("placeholder".into(), json!(placeholder));
        }
        if let Some(width) = &field.width {
            out.insert("width".into(), json!(width));
        }
        if field.readonly {
            out.insert("readonly".into(), json!(true));
        }
        if let Some(condition) = &field.condition {
            out.insert("condition".into(), condition_json(condition));
        }
        Json::Object(out)
    }
}
