pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod formatters;
pub mod io;
pub mod ledger;
pub mod matching;
pub mod models;
pub mod pagination;
pub mod query;
pub mod ranking;
pub mod search;
pub mod session;
pub mod setup;
pub mod similarity;

// Re-export commonly used items
pub use api::{HttpImageFetcher, ImageFetcher};
pub use cache::ImageCache;
pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::{CollectionError, CollectionResult};
pub use formatters::{format_inventory, format_results_page, format_search_outcome};
pub use io::{read_catalog, read_inventory, write_inventory};
pub use ledger::{
    CsvInventoryStore, DecrementOutcome, InventoryLedger, InventoryStore, UndoEntry, UndoOutcome,
    UpsertOutcome,
};
pub use matching::match_names;
pub use models::{CatalogEntry, InventoryRecord, PricePoint, PriceRow, RowKey, SearchResult, Variant};
pub use pagination::paginate;
pub use search::{search, SearchOptions, SearchOutcome, SearchPage};
pub use session::Session;
pub use setup::{InventoryDialogs, InventorySelection, SetupChoice};
