//! Holds several catalog entries for lookup by id or name.
//!
//! Entry ids are unique across a catalog; registering a second entry with an
//! id already in use is an error so lint runs over a directory of documents
//! surface the collision.

use crate::catalog::identity::EntryId;
use crate::catalog::model::CatalogEntry;
use anyhow::{Result, bail};
use std::collections::BTreeMap;

#[derive(Default)]
/// In-memory store for catalog entries keyed by `EntryId`.
pub struct CatalogRepository {
    entries: BTreeMap<EntryId, CatalogEntry>,
}

impl CatalogRepository {
    /// Register an entry for later lookup.
    pub fn register(&mut self, entry: CatalogEntry) -> Result<()> {
        if let Some(existing) = self.entries.get(&entry.id()) {
            bail!(
                "duplicate catalog id {}: '{}' conflicts with '{}'",
                entry.id(),
                entry.name(),
                existing.name()
            );
        }
        self.entries.insert(entry.id(), entry);
        Ok(())
    }

    /// Fetch an entry by id, if present.
    pub fn get(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    /// Resolve an entry by its dataset name.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.values().find(|entry| entry.name() == name)
    }

    /// Iterates entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
