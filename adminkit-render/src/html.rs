use adminkit_layout::{Field, Layout, Node, SectionNode, SidebarNode, TabNode, TabsNode};
use adminkit_model::{Entity, Record, Schema, Value};
use tracing::debug;

use crate::{Asset, ControlType, Renderer, capitalize};

/// Escapes `& < > " '` so text is safe both as element content and inside
/// a quoted attribute.
fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Plain server-rendered HTML: a `<form>` for editors and a `<table>` for lists.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    stylesheet: Option<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks hosts to include `url` alongside rendered pages.
    #[must_use]
    pub fn with_stylesheet(mut self, url: impl Into<String>) -> Self {
        self.stylesheet = Some(url.into());
        self
    }
}

impl Renderer for HtmlRenderer {
    fn render_editor(&self, layout: &Layout, data: &Record) -> String {
        let mut editor = EditorWriter {
            schema: layout.schema(),
            data,
            out: String::from(r#"<form method="post">"#),
            controls: 0,
        };
        for item in layout.items() {
            editor.node(item);
        }
        if let Some(sidebar) = layout.sidebar_node() {
            editor.sidebar(sidebar);
        }
        editor.out.push_str("</form>");

        debug!(controls = editor.controls, bytes = editor.out.len(), "Rendered HTML editor");
        editor.out
    }

    fn render_list(&self, schema: &Schema, entities: &[Entity]) -> String {
        let mut out = String::from("<table><thead><tr>");
        for slug in schema.slugs() {
            out.push_str(&format!("<th>{}</th>", escape(slug)));
        }
        out.push_str("</tr></thead><tbody>");
        for entity in entities {
            out.push_str("<tr>");
            for slug in schema.slugs() {
                let text = entity.get(slug).map(Value::to_text).unwrap_or_default();
                out.push_str(&format!("<td>{}</td>", escape(&text)));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");

        debug!(rows = entities.len(), columns = schema.len(), "Rendered HTML list");
        out
    }

    fn enqueue_assets(&self) -> Vec<Asset> {
        self.stylesheet
            .iter()
            .cloned()
            .map(Asset::Stylesheet)
            .collect()
    }
}

/// Accumulates one editor document.
struct EditorWriter<'a> {
    schema: &'a Schema,
    data: &'a Record,
    out: String,
    controls: usize,
}

impl EditorWriter<'_> {
    fn node(&mut self, node: &Node) {
        match node {
            Node::Section(section) => self.section(section),
            Node::Tabs(tabs) => self.tabs(tabs),
        }
    }

    fn section(&mut self, section: &SectionNode) {
        self.out.push_str("<fieldset>");
        self.out
            .push_str(&format!("<legend>{}</legend>", escape(&section.label)));
        for field in &section.fields {
            self.field(field);
        }
        for item in &section.items {
            self.node(item);
        }
        self.out.push_str("</fieldset>");
    }

    fn tabs(&mut self, tabs: &TabsNode) {
        self.out.push_str(r#"<div class="tabs"><div class="tab-labels">"#);
        for tab in &tabs.tabs {
            self.out.push_str(&format!(
                r#"<span class="tab-label">{}</span>"#,
                escape(&tab.label)
            ));
        }
        self.out.push_str("</div>");
        for tab in &tabs.tabs {
            self.tab(tab);
        }
        self.out.push_str("</div>");
    }

    fn tab(&mut self, tab: &TabNode) {
        self.out.push_str(r#"<div class="tab-content">"#);
        for field in &tab.fields {
            self.field(field);
        }
        for item in &tab.items {
            self.node(item);
        }
        self.out.push_str("</div>");
    }

    fn sidebar(&mut self, sidebar: &SidebarNode) {
        self.out.push_str(r#"<aside class="sidebar">"#);
        for field in &sidebar.fields {
            self.field(field);
        }
        if !sidebar.actions.is_empty() {
            self.out.push_str(r#"<div class="actions">"#);
            for action in &sidebar.actions {
                let kind = if action == "save" { "submit" } else { "button" };
                self.out.push_str(&format!(
                    r#"<button type="{kind}" name="action" value="{}">{}</button>"#,
                    escape(action),
                    escape(&capitalize(action)),
                ));
            }
            self.out.push_str("</div>");
        }
        self.out.push_str("</aside>");
    }

    fn field(&mut self, field: &Field) {
        let slug = escape(&field.slug);
        self.out.push_str(r#"<div class="field">"#);
        self.out.push_str(&format!(
            r#"<label for="{slug}">{}</label>"#,
            escape(&capitalize(&field.slug))
        ));
        self.input(field);
        if let Some(help) = &field.help {
            self.out
                .push_str(&format!(r#"<p class="help">{}</p>"#, escape(help)));
        }
        self.out.push_str("</div>");
        self.controls += 1;
    }

    fn input(&mut self, field: &Field) {
        let control = ControlType::for_field(self.schema, &field.slug);
        let value = self.data.get(&field.slug);

        let mut attrs: Vec<(&str, String)> = vec![
            ("id", field.slug.clone()),
            ("name", field.slug.clone()),
            ("type", control.input_type().to_string()),
        ];
        match control {
            ControlType::Toggle => {
                if value.is_some_and(Value::is_truthy) {
                    attrs.push(("checked", "checked".into()));
                }
                attrs.push(("value", "1".into()));
            }
            ControlType::Text | ControlType::Number => {
                if let Some(value) = value.filter(|v| !v.is_null()) {
                    attrs.push(("value", value.to_text()));
                }
            }
        }
        if let Some(placeholder) = &field.placeholder {
            attrs.push(("placeholder", placeholder.clone()));
        }
        if field.readonly {
            attrs.push(("readonly", "readonly".into()));
        }
        if let Some(width) = &field.width {
            attrs.push(("style", format!("width: {width}")));
        }

        let rendered: Vec<String> = attrs
            .iter()
            .map(|(name, value)| format!(r#"{name}="{}""#, escape(value)))
            .collect();
        self.out.push_str(&format!("<input {}>", rendered.join(" ")));
    }
}
