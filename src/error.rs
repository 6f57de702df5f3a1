use thiserror::Error;

/// Unified error type for catalog, inventory and network operations
#[derive(Debug, Error)]
pub enum CollectionError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed CSV input or output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Failed to parse or write JSON
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Fetched bytes are not an image we recognise
    #[error("Image error: {0}")]
    Image(String),
    /// The inventory file could not be written; the in-memory state was not advanced
    #[error("Failed to persist inventory during {operation}: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: Box<CollectionError>,
    },
    /// No catalog entry carries this identifier
    #[error("Card not found in catalog: {0}")]
    CardNotFound(String),
    /// No inventory row carries this (card id, card type) key
    #[error("No inventory row for {0}")]
    RowNotFound(String),
    /// A row count would exceed the largest storable count
    #[error("Count for {0} is already at its maximum")]
    CountOverflow(String),
    /// Refused to create an inventory over an existing file
    #[error("Inventory file already exists: {}", .0.display())]
    InventoryExists(std::path::PathBuf),
    /// A collection operation was requested while no inventory file is open
    #[error("No inventory file is open")]
    NoInventory,
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CollectionError {
    /// Wraps a storage failure so callers can tell a rolled-back mutation apart
    pub fn persistence(operation: &'static str, source: CollectionError) -> Self {
        CollectionError::Persistence {
            operation,
            source: Box::new(source),
        }
    }
}

/// Result type alias for library operations
pub type CollectionResult<T> = Result<T, CollectionError>;
