//! Storage layer for adminkit.
//!
//! Data objects never talk to a database directly. They own one storage
//! adapter implementing one of two contracts:
//!
//! - [`SingularStorage`]: exactly one persistent record (e.g. plugin settings),
//!   edited in memory and written back whole on `save`.
//! - [`PluralStorage`]: an id-keyed collection of records. Ids are assigned
//!   by the backend on insert, and every operation is scoped to the
//!   collection's own namespace.
//!
//! # Reference backend
//!
//! [`HostStore`] stands in for the host platform: a shared option table and a
//! shared content table holding rows of every collection. [`OptionStorage`]
//! and [`CollectionStorage`] are the adapters over it. A `HostStore` can live
//! purely in memory or be snapshotted to a JSON file.

mod collection;
mod error;
mod host;
mod option;
mod traits;

pub use collection::CollectionStorage;
pub use error::{StorageError, StorageResult};
pub use host::HostStore;
pub use option::OptionStorage;
pub use traits::{PluralStorage, SingularStorage};
