use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when set metadata carries no readable name
pub const UNKNOWN_SET: &str = "Unknown Set";
/// Label used when set metadata carries no readable release date
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// The print treatments a card can come in, each priced independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Variant {
    #[default]
    Normal,
    Holofoil,
    ReverseHolofoil,
    FirstEditionHolofoil,
    FirstEditionNormal,
}

impl Variant {
    /// Returns the label shown to the user and stored in the `Card Type` column
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Normal => "Normal",
            Variant::Holofoil => "Holofoil",
            Variant::ReverseHolofoil => "Reverse Holofoil",
            Variant::FirstEditionHolofoil => "1st Ed Holofoil",
            Variant::FirstEditionNormal => "1st Ed Normal",
        }
    }

    /// Returns the key the card API uses for this variant's price block
    pub fn api_key(&self) -> &'static str {
        match self {
            Variant::Normal => "normal",
            Variant::Holofoil => "holofoil",
            Variant::ReverseHolofoil => "reverseHolofoil",
            Variant::FirstEditionHolofoil => "firstEditionHolofoil",
            Variant::FirstEditionNormal => "firstEditionNormal",
        }
    }

    /// Parse either a display label or an API key into a Variant
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::all().iter().copied().find(|v| {
            v.label().eq_ignore_ascii_case(wanted) || v.api_key().eq_ignore_ascii_case(wanted)
        })
    }

    /// Returns all variants in display order
    pub fn all() -> &'static [Variant] {
        &[
            Variant::Normal,
            Variant::Holofoil,
            Variant::ReverseHolofoil,
            Variant::FirstEditionHolofoil,
            Variant::FirstEditionNormal,
        ]
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single price field of one variant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PricePoint {
    Value(f64),
    /// The field is missing or null while the card does have pricing
    #[default]
    NotOffered,
    /// Pricing was never recorded for the card at all
    NoData,
}

impl PricePoint {
    pub fn is_value(&self) -> bool {
        matches!(self, PricePoint::Value(_))
    }
}

impl From<Option<f64>> for PricePoint {
    fn from(value: Option<f64>) -> Self {
        value.map(PricePoint::Value).unwrap_or(PricePoint::NotOffered)
    }
}

impl fmt::Display for PricePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricePoint::Value(v) => write!(f, "{:.2}", v),
            PricePoint::NotOffered => f.write_str("-"),
            PricePoint::NoData => f.write_str("no data"),
        }
    }
}

/// The five price points recorded for one variant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceRow {
    pub low: PricePoint,
    pub mid: PricePoint,
    pub high: PricePoint,
    pub market: PricePoint,
    pub direct_low: PricePoint,
}

impl PriceRow {
    pub fn uniform(point: PricePoint) -> Self {
        Self {
            low: point,
            mid: point,
            high: point,
            market: point,
            direct_low: point,
        }
    }

    /// True when at least one of market, high, mid or low carries a value.
    /// A variant without any of these does not exist for the card.
    pub fn is_offered(&self) -> bool {
        [self.market, self.high, self.mid, self.low]
            .iter()
            .any(PricePoint::is_value)
    }

    fn points(&self) -> [PricePoint; 5] {
        [self.low, self.mid, self.high, self.market, self.direct_low]
    }
}

/// Per-variant pricing of a card
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSheet {
    rows: [PriceRow; 5],
}

impl Default for PriceSheet {
    fn default() -> Self {
        Self::not_offered()
    }
}

impl PriceSheet {
    /// Every field of every variant marked not offered
    pub fn not_offered() -> Self {
        Self {
            rows: [PriceRow::uniform(PricePoint::NotOffered); 5],
        }
    }

    /// Every field of every variant marked as never recorded
    pub fn no_data() -> Self {
        Self {
            rows: [PriceRow::uniform(PricePoint::NoData); 5],
        }
    }

    pub fn get(&self, variant: Variant) -> &PriceRow {
        &self.rows[variant.index()]
    }

    pub fn set(&mut self, variant: Variant, row: PriceRow) {
        self.rows[variant.index()] = row;
    }

    /// True when no field of any variant carries a value
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.points().iter().all(|p| !p.is_value()))
    }

    /// Escalates a sheet in which no variant has any value to "no data".
    pub fn normalized(self) -> Self {
        if self.is_empty() {
            Self::no_data()
        } else {
            self
        }
    }
}

/// TCGplayer listing attached to a card
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TcgPlayerInfo {
    pub url: Option<String>,
    pub updated_at: Option<String>,
    pub prices: PriceSheet,
}

impl TcgPlayerInfo {
    /// A card for which pricing was never recorded
    pub fn no_data() -> Self {
        Self {
            url: None,
            updated_at: None,
            prices: PriceSheet::no_data(),
        }
    }
}

/// Set metadata of a card
#[derive(Debug, Clone, PartialEq)]
pub struct SetInfo {
    pub name: String,
    pub release_date: String,
    pub printed_total: Option<u32>,
}

impl Default for SetInfo {
    fn default() -> Self {
        Self {
            name: UNKNOWN_SET.to_string(),
            release_date: UNKNOWN_DATE.to_string(),
            printed_total: None,
        }
    }
}

/// Image URLs of a card
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageSet {
    pub small: Option<String>,
    pub large: Option<String>,
}

/// One card of the source catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Position within the set as printed (usually numeric, e.g. "6", but "SV1" exists)
    pub number: String,
    pub set: SetInfo,
    pub images: ImageSet,
    pub tcgplayer: TcgPlayerInfo,
}

impl CatalogEntry {
    /// Numeric set position, if the printed number is a plain integer
    pub fn set_position(&self) -> Option<u32> {
        self.number.trim().parse().ok()
    }

    pub fn prices(&self, variant: Variant) -> &PriceRow {
        self.tcgplayer.prices.get(variant)
    }
}

/// A catalog entry prepared for display under the selected variant
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    pub entry: &'a CatalogEntry,
    pub variant: Variant,
    pub set_name: String,
    pub release_date: String,
    pub image_url: Option<String>,
    pub prices: PriceRow,
}

impl<'a> SearchResult<'a> {
    pub fn new(entry: &'a CatalogEntry, variant: Variant) -> Self {
        Self {
            entry,
            variant,
            set_name: entry.set.name.clone(),
            release_date: entry.set.release_date.clone(),
            image_url: entry.images.large.clone(),
            prices: *entry.prices(variant),
        }
    }
}

/// Identity of an inventory row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub card_id: String,
    pub card_type: String,
}

impl RowKey {
    pub fn new(card_id: &str, variant: Variant) -> Self {
        Self {
            card_id: card_id.to_string(),
            card_type: variant.label().to_string(),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.card_id, self.card_type)
    }
}

/// One row of the user's collection. Prices are snapshots of the displayed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Series")]
    pub series: String,
    #[serde(rename = "Release Date")]
    pub release_date: String,
    #[serde(rename = "Market Price")]
    pub market_price: String,
    #[serde(rename = "High Price")]
    pub high_price: String,
    #[serde(rename = "Mid Price")]
    pub mid_price: String,
    #[serde(rename = "Low Price")]
    pub low_price: String,
    #[serde(rename = "Card Type")]
    pub card_type: String,
    #[serde(rename = "Count")]
    pub count: u32,
}

impl InventoryRecord {
    /// Column headers of the inventory file, in order
    pub const COLUMNS: [&'static str; 10] = [
        "Name",
        "ID",
        "Series",
        "Release Date",
        "Market Price",
        "High Price",
        "Mid Price",
        "Low Price",
        "Card Type",
        "Count",
    ];

    /// Snapshot of a displayed search result with a count of one
    pub fn from_result(result: &SearchResult<'_>) -> Self {
        Self {
            name: result.entry.name.clone(),
            id: result.entry.id.clone(),
            series: result.set_name.clone(),
            release_date: result.release_date.clone(),
            market_price: result.prices.market.to_string(),
            high_price: result.prices.high.to_string(),
            mid_price: result.prices.mid.to_string(),
            low_price: result.prices.low.to_string(),
            card_type: result.variant.label().to_string(),
            count: 1,
        }
    }

    pub fn key(&self) -> RowKey {
        RowKey {
            card_id: self.id.clone(),
            card_type: self.card_type.clone(),
        }
    }

    pub fn matches(&self, key: &RowKey) -> bool {
        self.id == key.card_id && self.card_type == key.card_type
    }
}
