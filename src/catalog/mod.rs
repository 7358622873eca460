//! Catalog entry model.
//!
//! Types here mirror the document keys of a dataset catalog entry; callers
//! load them through `crate::loader` and use `CatalogRepository` when several
//! entries are held at once.

pub mod identity;
pub mod model;
pub mod repository;

pub use identity::{EntryId, FieldType};
pub use model::{CatalogEntry, DisplaySettings, Field, Resource, Schema, Source};
pub use repository::CatalogRepository;
