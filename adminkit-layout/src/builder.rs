use adminkit_model::{Schema, Value};
use std::sync::Arc;

use crate::node::{
    Condition, Field, Node, SectionNode, SidebarNode, Structure, TabNode, TabsNode,
};
use crate::{LayoutError, LayoutResult};

/// Checks `slug` against the schema and appends a fresh field placement.
fn push_field<'f>(
    schema: &Schema,
    fields: &'f mut Vec<Field>,
    slug: &str,
) -> LayoutResult<&'f mut Field> {
    if !schema.has_field(slug) {
        return Err(LayoutError::UndefinedField {
            slug: slug.to_string(),
        });
    }
    let index = fields.len();
    fields.push(Field::new(slug));
    Ok(&mut fields[index])
}

fn build_section<F>(schema: &Schema, label: String, build: F) -> LayoutResult<Node>
where
    F: FnOnce(&mut Section<'_>) -> LayoutResult<()>,
{
    let mut section = Section {
        schema,
        node: SectionNode::new(label),
    };
    build(&mut section)?;
    Ok(Node::Section(section.node))
}

fn build_tabs<F>(schema: &Schema, build: F) -> LayoutResult<Node>
where
    F: FnOnce(&mut Tabs<'_>) -> LayoutResult<()>,
{
    let mut tabs = Tabs {
        schema,
        node: TabsNode::default(),
    };
    build(&mut tabs)?;
    Ok(Node::Tabs(tabs.node))
}

/// Entry point for describing an editor screen over one schema.
///
/// Containers are built through closures that receive a fresh child
/// builder, so the tree is acyclic and kept in insertion order. A field slug
/// the schema does not declare fails the whole construction:
///
/// ```
/// # use adminkit_layout::{Layout, LayoutError};
/// # use adminkit_model::Schema;
/// # use std::sync::Arc;
/// let schema = Arc::new(Schema::new().string("title").boolean("published"));
/// let mut layout = Layout::new(schema);
///
/// layout.section("Main", |s| {
///     s.field("title")?.placeholder("Untitled");
///     Ok(())
/// })?;
/// layout.sidebar(|s| {
///     s.field("published")?;
///     s.actions(["save", "delete"]);
///     Ok(())
/// })?;
///
/// let err = layout.section("Broken", |s| s.field("nope").map(|_| ()));
/// assert!(matches!(err, Err(LayoutError::UndefinedField { .. })));
/// # Ok::<(), LayoutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    schema: Arc<Schema>,
    items: Vec<Node>,
    sidebar: Option<SidebarNode>,
}

impl Layout {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            items: Vec::new(),
            sidebar: None,
        }
    }

    /// The schema fields are checked against.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Appends a section. Nothing is appended if `build` fails.
    pub fn section<F>(&mut self, label: impl Into<String>, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Section<'_>) -> LayoutResult<()>,
    {
        let node = build_section(&self.schema, label.into(), build)?;
        self.items.push(node);
        Ok(self)
    }

    /// Appends a tabs container.
    pub fn tabs<F>(&mut self, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Tabs<'_>) -> LayoutResult<()>,
    {
        let node = build_tabs(&self.schema, build)?;
        self.items.push(node);
        Ok(self)
    }

    /// Sets the sidebar, replacing any earlier one.
    pub fn sidebar<F>(&mut self, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Sidebar<'_>) -> LayoutResult<()>,
    {
        let mut sidebar = Sidebar {
            schema: &self.schema,
            node: SidebarNode::default(),
        };
        build(&mut sidebar)?;
        let node = sidebar.node;
        self.sidebar = Some(node);
        Ok(self)
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn sidebar_node(&self) -> Option<&SidebarNode> {
        self.sidebar.as_ref()
    }

    /// Snapshot of the tree, depth-first and in insertion order.
    pub fn get_structure(&self) -> Structure {
        Structure {
            items: self.items.clone(),
            sidebar: self.sidebar.clone(),
        }
    }

    /// Every placed field slug, depth-first, sidebar fields last.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for item in &self.items {
            item.field_slugs(&mut out);
        }
        if let Some(sidebar) = &self.sidebar {
            out.extend(sidebar.fields.iter().map(|f| f.slug.as_str()));
        }
        out
    }
}

/// Builder handed to `section(..)` closures.
#[derive(Debug)]
pub struct Section<'s> {
    schema: &'s Schema,
    node: SectionNode,
}

impl Section<'_> {
    pub fn field(&mut self, slug: &str) -> LayoutResult<&mut Field> {
        push_field(self.schema, &mut self.node.fields, slug)
    }

    pub fn section<F>(&mut self, label: impl Into<String>, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Section<'_>) -> LayoutResult<()>,
    {
        let node = build_section(self.schema, label.into(), build)?;
        self.node.items.push(node);
        Ok(self)
    }

    pub fn tabs<F>(&mut self, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Tabs<'_>) -> LayoutResult<()>,
    {
        let node = build_tabs(self.schema, build)?;
        self.node.items.push(node);
        Ok(self)
    }

    pub fn columns(&mut self, count: u32) -> &mut Self {
        self.node.columns = Some(count);
        self
    }

    pub fn condition(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.node.condition = Some(Condition {
            field: field.into(),
            value: value.into(),
        });
        self
    }
}

/// Builder handed to `tabs(..)` closures.
#[derive(Debug)]
pub struct Tabs<'s> {
    schema: &'s Schema,
    node: TabsNode,
}

impl Tabs<'_> {
    pub fn tab<F>(&mut self, label: impl Into<String>, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Tab<'_>) -> LayoutResult<()>,
    {
        let mut tab = Tab {
            schema: self.schema,
            node: TabNode {
                label: label.into(),
                fields: Vec::new(),
                items: Vec::new(),
            },
        };
        build(&mut tab)?;
        self.node.tabs.push(tab.node);
        Ok(self)
    }
}

/// Builder handed to `tab(..)` closures.
#[derive(Debug)]
pub struct Tab<'s> {
    schema: &'s Schema,
    node: TabNode,
}

impl Tab<'_> {
    pub fn field(&mut self, slug: &str) -> LayoutResult<&mut Field> {
        push_field(self.schema, &mut self.node.fields, slug)
    }

    pub fn section<F>(&mut self, label: impl Into<String>, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Section<'_>) -> LayoutResult<()>,
    {
        let node = build_section(self.schema, label.into(), build)?;
        self.node.items.push(node);
        Ok(self)
    }

    pub fn tabs<F>(&mut self, build: F) -> LayoutResult<&mut Self>
    where
        F: FnOnce(&mut Tabs<'_>) -> LayoutResult<()>,
    {
        let node = build_tabs(self.schema, build)?;
        self.node.items.push(node);
        Ok(self)
    }
}

/// Builder handed to `sidebar(..)` closures.
#[derive(Debug)]
pub struct Sidebar<'s> {
    schema: &'s Schema,
    node: SidebarNode,
}

impl Sidebar<'_> {
    pub fn field(&mut self, slug: &str) -> LayoutResult<&mut Field> {
        push_field(self.schema, &mut self.node.fields, slug)
    }

    /// Action identifiers such as `save` or `delete`, replacing earlier ones.
    pub fn actions<I, S>(&mut self, actions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node.actions = actions.into_iter().map(Into::into).collect();
        self
    }
}
