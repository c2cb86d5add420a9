//! The finished layout tree.
//!
//! These types are what [`Layout::get_structure`](crate::Layout::get_structure)
//! returns and what renderers walk. Their serde shape is the tagged tree
//! exchanged with front ends: optional keys are omitted when unset and nested
//! `items` are omitted when empty.

use adminkit_model::Value;
use serde::{Deserialize, Serialize};

/// Show the owning node only while `field` holds `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub value: Value,
}

/// One field placement plus its presentation options.
///
/// Obtained from a container's `field()` call, which has already checked the
/// slug against the schema. The setters chain:
///
/// ```
/// # use adminkit_layout::Field;
/// let mut field = Field::new("email");
/// field.placeholder("name@example.com").width("50%").readonly();
/// assert!(field.readonly);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Field {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            help: None,
            placeholder: None,
            width: None,
            readonly: false,
            condition: None,
        }
    }

    pub fn help(&mut self, text: impl Into<String>) -> &mut Self {
        self.help = Some(text.into());
        self
    }

    pub fn placeholder(&mut self, text: impl Into<String>) -> &mut Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Any CSS length, e.g. `"50%"`.
    pub fn width(&mut self, width: impl Into<String>) -> &mut Self {
        self.width = Some(width.into());
        self
    }

    pub fn readonly(&mut self) -> &mut Self {
        self.readonly = true;
        self
    }

    pub fn condition(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.condition = Some(Condition {
            field: field.into(),
            value: value.into(),
        });
        self
    }
}

/// A container that can sit in an ordered item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Section(SectionNode),
    Tabs(TabsNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub label: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl SectionNode {
    pub(crate) fn new(label: String) -> Self {
        Self {
            label,
            fields: Vec::new(),
            items: Vec::new(),
            columns: None,
            condition: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabsNode {
    pub tabs: Vec<TabNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabNode {
    pub label: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidebarNode {
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
}

/// A whole layout: ordered items plus the single optional sidebar slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub items: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<SidebarNode>,
}

impl Node {
    /// Field slugs under this node, depth-first in insertion order.
    pub fn field_slugs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Section(section) => {
                out.extend(section.fields.iter().map(|f| f.slug.as_str()));
                for item in &section.items {
                    item.field_slugs(out);
                }
            }
            Node::Tabs(tabs) => {
                for tab in &tabs.tabs {
                    out.extend(tab.fields.iter().map(|f| f.slug.as_str()));
                    for item in &tab.items {
                        item.field_slugs(out);
                    }
                }
            }
        }
    }
}
