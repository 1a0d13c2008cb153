use std::path::Path;

use crate::{error::LoadError, models::CatalogEntry};

/// In-memory id/title reference table
///
/// Loaded once at startup from the catalog CSV and never mutated afterwards.
/// Both lookups are linear scans in dataset row order, which is plenty for a
/// catalog that fits comfortably in memory.
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Loads the catalog from a CSV file with `movieId` and `title` columns.
    ///
    /// Extra columns are ignored. Any unreadable or undecodable row is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let entries = reader
            .deserialize()
            .collect::<Result<Vec<CatalogEntry>, _>>()?;

        tracing::debug!(entries = entries.len(), "catalog loaded");
        Ok(Self { entries })
    }

    /// Builds a catalog from already-materialized entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Returns the id of the first entry whose title contains `query`.
    ///
    /// Matching is case-sensitive substring containment, first match in
    /// dataset row order wins. "Batman" therefore resolves to whichever
    /// Batman film appears first in the dataset.
    pub fn resolve_id_by_title(&self, query: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.title.contains(query))
            .map(|entry| entry.id)
    }

    /// Exact-match title lookup by id.
    pub fn resolve_title_by_id(&self, id: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
