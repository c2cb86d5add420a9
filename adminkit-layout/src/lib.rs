//! Editor layout composition for adminkit.
//!
//! A [`Layout`] is bound to one [`Schema`](adminkit_model::Schema) and holds an
//! ordered list of sections and tab groups plus an optional sidebar. Every
//! field placement is checked against the schema when it is added, so a typo
//! in a slug fails at configuration time rather than when rendering.
//!
//! The finished tree ([`Structure`]) is plain data: renderers walk it and
//! front ends receive it as JSON.

mod builder;
mod error;
mod node;

pub use builder::{Layout, Section, Sidebar, Tab, Tabs};
pub use error::{LayoutError, LayoutResult};
pub use node::{Condition, Field, Node, SectionNode, SidebarNode, Structure, TabNode, TabsNode};
