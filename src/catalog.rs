//! In-memory card catalog.
//!
//! Loaded once from a catalog file and read-only afterwards; `reload` swaps in a
//! fresh copy of the same file.

use crate::error::CollectionResult;
use crate::io::read_catalog;
use crate::models::CatalogEntry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    /// Distinct card names in first-appearance order
    names: Vec<String>,
    by_id: HashMap<String, usize>,
    source: Option<PathBuf>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let mut by_id = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            if seen.insert(entry.name.as_str()) {
                names.push(entry.name.clone());
            }
            by_id.entry(entry.id.clone()).or_insert(index);
        }

        Self {
            entries,
            names,
            by_id,
            source: None,
        }
    }

    /// Load a catalog from a legacy CSV or structured JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> CollectionResult<Self> {
        let path = path.as_ref();
        log::info!("Loading catalog from: {}", path.display());
        let mut catalog = Self::new(read_catalog(path)?);
        catalog.source = Some(path.to_path_buf());
        log::info!(
            "Catalog ready: {} cards, {} distinct names",
            catalog.len(),
            catalog.names.len()
        );
        Ok(catalog)
    }

    /// Re-read the file this catalog was loaded from. Leaves the catalog untouched on error.
    pub fn reload(&mut self) -> CollectionResult<()> {
        if let Some(path) = self.source.clone() {
            *self = Self::load(path)?;
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
