use std::io::Write;
use tcg_collection::io::{
    create_inventory_file, read_catalog, read_catalog_csv, read_inventory, write_inventory,
};
use tcg_collection::models::{InventoryRecord, PricePoint, PriceSheet, Variant};
use tempfile::{NamedTempFile, TempDir};

// Test fixtures - legacy nested-record text as found in old catalog exports

const BASE_SET: &str = "Set(id='base1', images=SetImage(symbol='https://images.pokemontcg.io/base1/symbol.png', logo='https://images.pokemontcg.io/base1/logo.png'), name='Base', printedTotal=102, ptcgoCode='BS', releaseDate='1999/01/09', series='Base', total=102)";

const CHARIZARD_IMAGES: &str = "CardImage(small='https://images.pokemontcg.io/base1/4.png', large='https://images.pokemontcg.io/base1/4_hires.png')";

const CHARIZARD_PRICES: &str = "TCGPlayer(url='https://prices.pokemontcg.io/tcgplayer/base1-4', updatedAt='2023/10/04', prices=TCGPrices(normal=None, holofoil=TCGPrice(low=250.0, mid=399.99, high=1000.0, market=350.5, directLow=None), reverseHolofoil=None, firstEditionHolofoil=None, firstEditionNormal=None))";

fn write_legacy_catalog(rows: &[[&str; 7]]) -> NamedTempFile {
    let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    let mut wtr = csv::Writer::from_path(file.path()).unwrap();
    wtr.write_record(["id", "name", "supertype", "number", "set", "images", "tcgplayer"])
        .unwrap();
    for row in rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
    file
}

fn charizard_json() -> serde_json::Value {
    serde_json::json!({
        "id": "base1-4",
        "name": "Charizard",
        "supertype": "Pokémon",
        "number": "4",
        "set": { "id": "base1", "name": "Base", "printedTotal": 102, "releaseDate": "1999/01/09" },
        "images": {
            "small": "https://images.pokemontcg.io/base1/4.png",
            "large": "https://images.pokemontcg.io/base1/4_hires.png"
        },
        "tcgplayer": {
            "url": "https://prices.pokemontcg.io/tcgplayer/base1-4",
            "updatedAt": "2023/10/04",
            "prices": {
                "holofoil": { "low": 250.0, "mid": 399.99, "high": 1000.0, "market": 350.5, "directLow": null }
            }
        }
    })
}

fn write_json(value: serde_json::Value) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

fn inventory_row(id: &str, count: u32) -> InventoryRecord {
    InventoryRecord {
        name: "Charizard".to_string(),
        id: id.to_string(),
        series: "Base".to_string(),
        release_date: "1999/01/09".to_string(),
        market_price: "350.50".to_string(),
        high_price: "1000.00".to_string(),
        mid_price: "399.99".to_string(),
        low_price: "250.00".to_string(),
        card_type: "Holofoil".to_string(),
        count,
    }
}

// Catalog reading

#[test]
fn test_legacy_catalog_extracts_nested_fields() {
    let file = write_legacy_catalog(&[[
        "base1-4",
        "Charizard",
        "Pokémon",
        "4",
        BASE_SET,
        CHARIZARD_IMAGES,
        CHARIZARD_PRICES,
    ]]);

    let entries = read_catalog(file.path()).unwrap();

    assert_eq!(entries.len(), 1);
    let charizard = &entries[0];
    assert_eq!(charizard.name, "Charizard");
    assert_eq!(charizard.set.name, "Base");
    assert_eq!(charizard.set.release_date, "1999/01/09");
    assert_eq!(charizard.set.printed_total, Some(102));
    assert_eq!(
        charizard.images.large.as_deref(),
        Some("https://images.pokemontcg.io/base1/4_hires.png")
    );
    assert_eq!(charizard.prices(Variant::Holofoil).market, PricePoint::Value(350.5));
    assert_eq!(charizard.prices(Variant::Normal).market, PricePoint::NotOffered);
}

#[test]
fn test_legacy_catalog_blank_pricing_is_no_data() {
    let file = write_legacy_catalog(&[[
        "basep-1",
        "Pikachu",
        "Pokémon",
        "1",
        "Set(id='basep', name='Wizards Black Star Promos', printedTotal=53, releaseDate='1999/07/01')",
        "",
        "",
    ]]);

    let entries = read_catalog_csv(file.path()).unwrap();

    assert_eq!(entries[0].tcgplayer.prices, PriceSheet::no_data());
    assert_eq!(entries[0].images.large, None);
    assert_eq!(entries[0].set.printed_total, Some(53));
}

#[test]
fn test_legacy_catalog_missing_columns_default() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "id,name,number\nxy1-1,Venusaur EX,1\n").unwrap();

    let entries = read_catalog(file.path()).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].set.name, "Unknown Set");
    assert_eq!(entries[0].set.release_date, "Unknown Date");
    assert_eq!(entries[0].tcgplayer.prices, PriceSheet::no_data());
}

#[test]
fn test_json_catalog_matches_legacy_catalog() {
    let legacy = write_legacy_catalog(&[[
        "base1-4",
        "Charizard",
        "Pokémon",
        "4",
        BASE_SET,
        CHARIZARD_IMAGES,
        CHARIZARD_PRICES,
    ]]);
    let json = write_json(serde_json::json!([charizard_json()]));

    let from_csv = read_catalog(legacy.path()).unwrap();
    let from_json = read_catalog(json.path()).unwrap();

    assert_eq!(from_csv, from_json);
}

#[test]
fn test_json_catalog_accepts_api_page_shape() {
    let json = write_json(serde_json::json!({
        "data": [charizard_json(), { "id": "base1-99", "name": "Mystery" }],
        "page": 1,
        "totalCount": 2
    }));

    let entries = read_catalog(json.path()).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].set.name, "Unknown Set");
    assert_eq!(entries[1].tcgplayer.prices, PriceSheet::no_data());
    assert_eq!(
        entries[0].tcgplayer.url.as_deref(),
        Some("https://prices.pokemontcg.io/tcgplayer/base1-4")
    );
}

#[test]
fn test_json_catalog_invalid_is_an_error() {
    let json = write_json(serde_json::json!({ "cards": "nope" }));
    assert!(read_catalog(json.path()).is_err());
}

#[test]
fn test_read_catalog_nonexistent_file() {
    assert!(read_catalog("/definitely/not/here.csv").is_err());
}

// Inventory reading and writing

#[test]
fn test_read_inventory_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let records = read_inventory(dir.path().join("nothing.csv")).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_read_inventory_fills_missing_columns() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Name,ID,Card Type\nCharizard,base1-4,Holofoil\n").unwrap();

    let records = read_inventory(file.path()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "base1-4");
    assert_eq!(records[0].series, "");
    assert_eq!(records[0].market_price, "");
    assert_eq!(records[0].count, 1);
}

#[test]
fn test_read_inventory_drops_zero_counts() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "Name,ID,Card Type,Count\nCharizard,base1-4,Holofoil,0\nBlastoise,base1-2,Holofoil,3\nMew,basep-8,Normal,lots\n"
    )
    .unwrap();

    let records = read_inventory(file.path()).unwrap();

    let counts: Vec<(&str, u32)> = records.iter().map(|r| (r.id.as_str(), r.count)).collect();
    assert_eq!(counts, vec![("base1-2", 3), ("basep-8", 1)]);
}

#[test]
fn test_read_inventory_accepts_spreadsheet_counts() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "Name,ID,Card Type,Count\nCharizard,base1-4,Holofoil,3.0\nBlastoise,base1-2,Holofoil,0.0\nMew,basep-8,Normal,-2\nEevee,base1-51,Normal,2.5\nLugia,neo1-9,Holofoil,\n"
    )
    .unwrap();

    let records = read_inventory(file.path()).unwrap();

    let counts: Vec<(&str, u32)> = records.iter().map(|r| (r.id.as_str(), r.count)).collect();
    assert_eq!(
        counts,
        vec![("base1-4", 3), ("basep-8", 1), ("base1-51", 1), ("neo1-9", 1)]
    );
}

#[test]
fn test_write_inventory_leaves_only_the_inventory_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("collection.csv");

    write_inventory(&path, &[inventory_row("base1-4", 2)]).unwrap();
    write_inventory(&path, &[inventory_row("base1-4", 3)]).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("collection.csv")]);
}

#[test]
fn test_failed_write_inventory_keeps_target_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    // A directory in the way makes the final replace fail
    let path = dir.path().join("collection.csv");
    std::fs::create_dir(&path).unwrap();

    assert!(write_inventory(&path, &[inventory_row("base1-4", 1)]).is_err());

    assert!(path.is_dir());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_inventory_rewrites_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("collection.csv");

    write_inventory(&path, &[inventory_row("base1-4", 2), inventory_row("base1-2", 1)]).unwrap();
    write_inventory(&path, &[inventory_row("base1-4", 3)]).unwrap();

    let records = read_inventory(&path).unwrap();
    assert_eq!(records, vec![inventory_row("base1-4", 3)]);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(
        "Name,ID,Series,Release Date,Market Price,High Price,Mid Price,Low Price,Card Type,Count\n"
    ));
}

#[test]
fn test_create_inventory_file_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("new.csv");

    create_inventory_file(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(read_inventory(&path).unwrap().is_empty());
}
