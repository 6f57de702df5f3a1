//! Choosing the active inventory file at start-up or on request.
//!
//! The dialogs are collaborators: the terminal front end prompts the user,
//! tests script the answers.

use crate::config::AppConfig;
use crate::error::{CollectionError, CollectionResult};
use crate::io::create_inventory_file;
use std::path::{Path, PathBuf};

/// Extension given to inventory files that are created without one
pub const INVENTORY_EXTENSION: &str = "csv";

/// Answer to "no inventory is configured, what now?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupChoice {
    SelectExisting,
    CreateNew,
    Cancel,
}

/// Prompts used while setting up an inventory. `None` means the user cancelled.
pub trait InventoryDialogs {
    fn choose_setup(&mut self) -> SetupChoice;
    fn pick_existing(&mut self) -> Option<PathBuf>;
    fn name_new(&mut self) -> Option<PathBuf>;
}

/// How the active inventory was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySelection {
    /// The configured file exists and was used as is
    Configured(PathBuf),
    Selected(PathBuf),
    Created(PathBuf),
    NoInventory,
}

impl InventorySelection {
    pub fn path(&self) -> Option<&Path> {
        match self {
            InventorySelection::Configured(p)
            | InventorySelection::Selected(p)
            | InventorySelection::Created(p) => Some(p),
            InventorySelection::NoInventory => None,
        }
    }
}

/// Appends `.csv` unless the path already ends in it
pub fn with_inventory_extension(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(INVENTORY_EXTENSION))
        .unwrap_or(false);
    if has_extension {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(INVENTORY_EXTENSION);
    PathBuf::from(name)
}

fn remember(config: &mut AppConfig, config_path: &Path, inventory: &Path) {
    config.inventory_file = Some(inventory.to_path_buf());
    if let Err(e) = config.save_to(config_path) {
        log::warn!("Failed to save configuration: {}", e);
    }
}

/// Creates a header-only inventory at `path` (with `.csv` appended when
/// missing) and makes it the configured inventory. An existing file is
/// never overwritten.
pub fn create_inventory(
    config: &mut AppConfig,
    config_path: &Path,
    path: &Path,
) -> CollectionResult<PathBuf> {
    let path = with_inventory_extension(path);
    if path.exists() {
        log::warn!("Not creating {}: file already exists", path.display());
        return Err(CollectionError::InventoryExists(path));
    }
    create_inventory_file(&path)?;
    remember(config, config_path, &path);
    Ok(path)
}

/// Makes an existing file the configured inventory
pub fn select_inventory(config: &mut AppConfig, config_path: &Path, path: &Path) -> PathBuf {
    remember(config, config_path, path);
    log::info!("Using inventory file {}", path.display());
    path.to_path_buf()
}

/// Returns the inventory to open, asking the user when the configured one is
/// missing. Cancelling at any step leaves the configuration untouched.
pub fn resolve_inventory(
    config: &mut AppConfig,
    config_path: &Path,
    dialogs: &mut dyn InventoryDialogs,
) -> CollectionResult<InventorySelection> {
    if let Some(path) = config.inventory_file.as_deref() {
        if path.exists() {
            return Ok(InventorySelection::Configured(path.to_path_buf()));
        }
        log::warn!("Configured inventory {} not found", path.display());
    }

    match dialogs.choose_setup() {
        SetupChoice::SelectExisting => match dialogs.pick_existing() {
            Some(path) => Ok(InventorySelection::Selected(select_inventory(
                config,
                config_path,
                &path,
            ))),
            None => Ok(InventorySelection::NoInventory),
        },
        SetupChoice::CreateNew => match dialogs.name_new() {
            Some(path) => Ok(InventorySelection::Created(create_inventory(
                config,
                config_path,
                &path,
            )?)),
            None => Ok(InventorySelection::NoInventory),
        },
        SetupChoice::Cancel => {
            log::info!("Inventory setup cancelled");
            Ok(InventorySelection::NoInventory)
        }
    }
}
