//! Rendering layer for adminkit.
//!
//! A [`Renderer`] turns a [`Layout`](adminkit_layout::Layout) plus a flat
//! record into an editor document, and a schema plus entities into a list
//! document. Two formats ship here:
//!
//! - [`HtmlRenderer`] for server-rendered admin pages
//! - [`JsonRenderer`] for front ends that draw their own controls
//!
//! Both resolve each placed field's control from the layout's schema through
//! [`ControlType`], and neither needs anything from the layout or schema
//! beyond their public data.

mod control;
mod html;
mod json;

pub use control::ControlType;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;

use adminkit_layout::Layout;
use adminkit_model::{Entity, Record, Schema};

/// A front-end asset a renderer needs the host page to include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Stylesheet(String),
    Script(String),
}

/// Output format for editor and list screens.
pub trait Renderer: Send + Sync {
    /// Renders every field placed in `layout`, populated from `data`.
    fn render_editor(&self, layout: &Layout, data: &Record) -> String;

    /// One row per entity, one column per schema field in declaration order.
    fn render_list(&self, schema: &Schema, entities: &[Entity]) -> String;

    /// Assets the output depends on. Most formats need none.
    fn enqueue_assets(&self) -> Vec<Asset> {
        Vec::new()
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
