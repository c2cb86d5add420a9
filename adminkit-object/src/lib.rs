//! Data objects: a slug, an optional schema and one storage adapter.
//!
//! - [`SingularObject`]: one persistent record (settings pages and the like).
//!   Values are coerced through the schema on `set` and on `get`.
//! - [`PluralObject`]: zero or more id-keyed [`adminkit_model::Entity`]
//!   instances. Values are stored exactly as given; see the type docs.

mod error;
mod plural;
mod singular;

pub use error::{ObjectError, ObjectResult};
pub use plural::PluralObject;
pub use singular::SingularObject;
