//! Everything one user session works on, passed explicitly to each operation.

use crate::api::{HttpImageFetcher, ImageFetcher};
use crate::cache::ImageCache;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::error::{CollectionError, CollectionResult};
use crate::ledger::{CsvInventoryStore, InventoryLedger, UpsertOutcome};
use crate::models::{SearchResult, Variant};
use crate::search::{search, SearchOptions, SearchOutcome};
use crate::setup::{self, InventoryDialogs, InventorySelection};
use std::path::{Path, PathBuf};

pub type CsvLedger = InventoryLedger<CsvInventoryStore>;

pub struct Session<F = HttpImageFetcher> {
    catalog: Catalog,
    ledger: Option<CsvLedger>,
    config: AppConfig,
    config_path: PathBuf,
    images: ImageCache<F>,
    options: SearchOptions,
}

impl Session<HttpImageFetcher> {
    pub fn new(catalog: Catalog, config: AppConfig, config_path: PathBuf) -> Self {
        Self::with_fetcher(catalog, config, config_path, HttpImageFetcher::new())
    }
}

impl<F: ImageFetcher> Session<F> {
    pub fn with_fetcher(
        catalog: Catalog,
        config: AppConfig,
        config_path: PathBuf,
        fetcher: F,
    ) -> Self {
        Self {
            catalog,
            ledger: None,
            config,
            config_path,
            images: ImageCache::new(fetcher),
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn reload_catalog(&mut self) -> CollectionResult<()> {
        self.catalog.reload()
    }

    /// Page `page_index` of the ranked results for `query`, priced for `variant`
    pub fn search(&self, query: &str, page_index: usize, variant: Variant) -> SearchOutcome<'_> {
        search(&self.catalog, query, page_index, variant, &self.options)
    }

    pub fn ledger(&self) -> Option<&CsvLedger> {
        self.ledger.as_ref()
    }

    pub fn ledger_mut(&mut self) -> CollectionResult<&mut CsvLedger> {
        self.ledger.as_mut().ok_or(CollectionError::NoInventory)
    }

    pub fn inventory_path(&self) -> Option<&Path> {
        self.ledger.as_ref().map(|l| l.store().path())
    }

    /// Adds one copy of a catalog card in `variant` to the open collection
    pub fn commit(&mut self, card_id: &str, variant: Variant) -> CollectionResult<UpsertOutcome> {
        let entry = self
            .catalog
            .get(card_id)
            .ok_or_else(|| CollectionError::CardNotFound(card_id.to_string()))?;
        let ledger = self.ledger.as_mut().ok_or(CollectionError::NoInventory)?;
        ledger.upsert(&SearchResult::new(entry, variant))
    }

    /// Opens an existing inventory file and remembers it in the configuration
    pub fn open_inventory(&mut self, path: &Path) -> CollectionResult<()> {
        let ledger = InventoryLedger::open(CsvInventoryStore::new(path))?;
        setup::select_inventory(&mut self.config, &self.config_path, path);
        self.ledger = Some(ledger);
        Ok(())
    }

    /// Creates an empty inventory file and switches to it
    pub fn create_inventory(&mut self, path: &Path) -> CollectionResult<PathBuf> {
        let path = setup::create_inventory(&mut self.config, &self.config_path, path)?;
        self.ledger = Some(InventoryLedger::open(CsvInventoryStore::new(&path))?);
        Ok(path)
    }

    /// Opens the configured inventory, asking the user through `dialogs`
    /// when it is missing
    pub fn setup_inventory(
        &mut self,
        dialogs: &mut dyn InventoryDialogs,
    ) -> CollectionResult<InventorySelection> {
        let selection = setup::resolve_inventory(&mut self.config, &self.config_path, dialogs)?;
        self.ledger = match selection.path() {
            Some(path) => Some(InventoryLedger::open(CsvInventoryStore::new(path))?),
            None => None,
        };
        Ok(selection)
    }

    /// Large image of a catalog card, if it has one
    pub fn image_for(&mut self, card_id: &str) -> CollectionResult<Option<&[u8]>> {
        let entry = self
            .catalog
            .get(card_id)
            .ok_or_else(|| CollectionError::CardNotFound(card_id.to_string()))?;
        match entry.images.large.clone() {
            Some(url) => self.images.get_or_fetch(&url).map(Some),
            None => Ok(None),
        }
    }
}
