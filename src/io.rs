use crate::error::CollectionResult;
use crate::extract::{extract_images, extract_set_info, extract_tcgplayer};
use crate::models::{
    CatalogEntry, ImageSet, InventoryRecord, PriceRow, PriceSheet, SetInfo, TcgPlayerInfo,
    Variant, UNKNOWN_DATE, UNKNOWN_SET,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Catalog row in the legacy export, where `set`, `images` and `tcgplayer`
/// hold the string form of nested objects.
#[derive(Debug, Deserialize)]
struct LegacyCatalogRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    number: String,
    #[serde(default)]
    set: String,
    #[serde(default)]
    images: String,
    #[serde(default)]
    tcgplayer: Option<String>,
}

impl From<LegacyCatalogRow> for CatalogEntry {
    fn from(row: LegacyCatalogRow) -> Self {
        CatalogEntry {
            set: extract_set_info(&row.set),
            images: extract_images(&row.images),
            tcgplayer: extract_tcgplayer(row.tcgplayer.as_deref()),
            id: row.id,
            name: row.name,
            number: row.number,
        }
    }
}

/// Card object as served by the card API
#[derive(Debug, Deserialize)]
struct ApiCard {
    id: String,
    name: String,
    #[serde(default)]
    number: String,
    #[serde(default)]
    set: Option<ApiSet>,
    #[serde(default)]
    images: Option<ApiImages>,
    #[serde(default)]
    tcgplayer: Option<ApiTcgPlayer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSet {
    name: Option<String>,
    printed_total: Option<u32>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiImages {
    small: Option<String>,
    large: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTcgPlayer {
    url: Option<String>,
    updated_at: Option<String>,
    #[serde(default)]
    prices: HashMap<String, Option<ApiPrice>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPrice {
    low: Option<f64>,
    mid: Option<f64>,
    high: Option<f64>,
    market: Option<f64>,
    direct_low: Option<f64>,
}

/// The catalog file is either a bare array or a page with a `data` array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiCatalogFile {
    Cards(Vec<ApiCard>),
    Page { data: Vec<ApiCard> },
}

impl From<ApiPrice> for PriceRow {
    fn from(price: ApiPrice) -> Self {
        PriceRow {
            low: price.low.into(),
            mid: price.mid.into(),
            high: price.high.into(),
            market: price.market.into(),
            direct_low: price.direct_low.into(),
        }
    }
}

impl From<ApiTcgPlayer> for TcgPlayerInfo {
    fn from(mut listing: ApiTcgPlayer) -> Self {
        let mut prices = PriceSheet::not_offered();
        for variant in Variant::all() {
            if let Some(Some(price)) = listing.prices.remove(variant.api_key()) {
                prices.set(*variant, price.into());
            }
        }
        TcgPlayerInfo {
            url: listing.url,
            updated_at: listing.updated_at,
            prices: prices.normalized(),
        }
    }
}

impl From<ApiCard> for CatalogEntry {
    fn from(card: ApiCard) -> Self {
        let set = card
            .set
            .map(|s| SetInfo {
                name: s.name.unwrap_or_else(|| UNKNOWN_SET.to_string()),
                release_date: s.release_date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
                printed_total: s.printed_total,
            })
            .unwrap_or_default();
        let images = card
            .images
            .map(|i| ImageSet {
                small: i.small,
                large: i.large,
            })
            .unwrap_or_default();

        CatalogEntry {
            id: card.id,
            name: card.name,
            number: card.number,
            set,
            images,
            tcgplayer: card
                .tcgplayer
                .map(TcgPlayerInfo::from)
                .unwrap_or_else(TcgPlayerInfo::no_data),
        }
    }
}

/// Reads a catalog file. `.json` files hold structured card objects; anything
/// else is read as the legacy CSV export.
pub fn read_catalog<P: AsRef<Path>>(path: P) -> CollectionResult<Vec<CatalogEntry>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        read_catalog_json(path)
    } else {
        read_catalog_csv(path)
    }
}

/// Reads the legacy CSV catalog, extracting nested fields from their text form.
pub fn read_catalog_csv<P: AsRef<Path>>(path: P) -> CollectionResult<Vec<CatalogEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut entries = Vec::new();
    for result in rdr.deserialize() {
        let row: LegacyCatalogRow = result?;
        entries.push(CatalogEntry::from(row));
    }

    log::info!("Read {} catalog rows from CSV", entries.len());
    Ok(entries)
}

/// Reads a structured JSON catalog.
pub fn read_catalog_json<P: AsRef<Path>>(path: P) -> CollectionResult<Vec<CatalogEntry>> {
    let content = std::fs::read_to_string(path)?;
    let cards = match serde_json::from_str(&content)? {
        ApiCatalogFile::Cards(cards) => cards,
        ApiCatalogFile::Page { data } => data,
    };

    let entries: Vec<CatalogEntry> = cards.into_iter().map(CatalogEntry::from).collect();
    log::info!("Read {} catalog cards from JSON", entries.len());
    Ok(entries)
}

/// Inventory row as found on disk; any column may be missing.
#[derive(Debug, Deserialize)]
struct InventoryRow {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Series", default)]
    series: String,
    #[serde(rename = "Release Date", default)]
    release_date: String,
    #[serde(rename = "Market Price", default)]
    market_price: String,
    #[serde(rename = "High Price", default)]
    high_price: String,
    #[serde(rename = "Mid Price", default)]
    mid_price: String,
    #[serde(rename = "Low Price", default)]
    low_price: String,
    #[serde(rename = "Card Type", default)]
    card_type: String,
    #[serde(rename = "Count", default)]
    count: String,
}

/// Whole-number count, also accepting the `3.0` form spreadsheet tools write
fn parse_count(text: &str) -> Option<u32> {
    if let Ok(n) = text.parse::<u32>() {
        return Some(n);
    }
    let value = text.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

impl InventoryRow {
    fn into_record(self) -> Option<InventoryRecord> {
        let text = self.count.trim();
        let count = match parse_count(text) {
            Some(0) => {
                log::warn!(
                    "Dropping inventory row {} ({}) with count {}",
                    self.id,
                    self.card_type,
                    text
                );
                return None;
            }
            Some(n) => n,
            None => {
                if !text.is_empty() {
                    log::warn!(
                        "Inventory row {} ({}) has unreadable count {:?}; using 1",
                        self.id,
                        self.card_type,
                        text
                    );
                }
                1
            }
        };

        Some(InventoryRecord {
            name: self.name,
            id: self.id,
            series: self.series,
            release_date: self.release_date,
            market_price: self.market_price,
            high_price: self.high_price,
            mid_price: self.mid_price,
            low_price: self.low_price,
            card_type: self.card_type,
            count,
        })
    }
}

/// Reads the inventory file. A missing file is an empty collection; missing
/// columns are filled with empty values.
pub fn read_inventory<P: AsRef<Path>>(path: P) -> CollectionResult<Vec<InventoryRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!("Inventory file {} does not exist yet", path.display());
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let row: InventoryRow = result?;
        if let Some(record) = row.into_record() {
            records.push(record);
        }
    }

    log::info!("Loaded {} inventory rows from {}", records.len(), path.display());
    Ok(records)
}

/// Rewrites the whole inventory file. Rows go to a temporary file next to
/// it which then replaces the old one, so a failed write leaves the previous
/// contents in place.
pub fn write_inventory<P: AsRef<Path>>(path: P, records: &[InventoryRecord]) -> CollectionResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(tempfile::NamedTempFile::new_in(dir)?);

    wtr.write_record(InventoryRecord::COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    let file = wtr.into_inner().map_err(|e| e.into_error())?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Creates an inventory file holding only the header row.
pub fn create_inventory_file<P: AsRef<Path>>(path: P) -> CollectionResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_inventory(path, &[])?;
    log::info!("Created inventory file {}", path.display());
    Ok(())
}
