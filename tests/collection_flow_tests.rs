use std::io::Write;
use tcg_collection::{
    AppConfig, Catalog, CollectionError, CsvInventoryStore, DecrementOutcome, InventoryLedger,
    RowKey, Session, UndoOutcome, UpsertOutcome, Variant,
};
use tempfile::TempDir;

fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("cards.json");
    let cards = serde_json::json!([
        {
            "id": "base1-4",
            "name": "Charizard",
            "number": "4",
            "set": { "name": "Base", "printedTotal": 102, "releaseDate": "1999/01/09" },
            "tcgplayer": { "prices": { "holofoil": { "market": 350.5, "low": 250.0 } } }
        },
        {
            "id": "base1-2",
            "name": "Blastoise",
            "number": "2",
            "set": { "name": "Base", "printedTotal": 102, "releaseDate": "1999/01/09" },
            "tcgplayer": { "prices": { "holofoil": { "market": 120.0 } } }
        },
        {
            "id": "basep-1",
            "name": "Pikachu",
            "number": "1",
            "set": { "name": "Wizards Black Star Promos", "printedTotal": 53, "releaseDate": "1999/07/01" }
        }
    ]);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", cards).unwrap();
    path
}

fn open_session(dir: &TempDir) -> Session {
    let catalog = Catalog::load(write_catalog(dir)).unwrap();
    Session::new(catalog, AppConfig::default(), dir.path().join("config.json"))
}

#[test]
fn test_search_commit_and_persist() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);
    let inventory = session
        .create_inventory(&dir.path().join("collection"))
        .unwrap();

    let card_id = {
        let outcome = session.search("4/102", 0, Variant::Holofoil);
        assert_eq!(outcome.total_count(), 1);
        outcome.results()[0].entry.id.clone()
    };
    assert_eq!(
        session.commit(&card_id, Variant::Holofoil).unwrap(),
        UpsertOutcome::Added
    );
    assert_eq!(
        session.commit(&card_id, Variant::Holofoil).unwrap(),
        UpsertOutcome::Incremented { count: 2 }
    );

    let reopened = InventoryLedger::open(CsvInventoryStore::new(&inventory)).unwrap();
    let rows = reopened.records();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Charizard");
    assert_eq!(rows[0].series, "Base");
    assert_eq!(rows[0].market_price, "350.50");
    assert_eq!(rows[0].high_price, "-");
    assert_eq!(rows[0].card_type, "Holofoil");
    assert_eq!(rows[0].count, 2);

    let config = AppConfig::load_from(&dir.path().join("config.json"));
    assert_eq!(config.inventory_file, Some(inventory));
}

#[test]
fn test_unpriced_card_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);
    session.create_inventory(&dir.path().join("mine.csv")).unwrap();

    // No pricing at all: every variant reads "no data"
    assert_eq!(
        session.commit("basep-1", Variant::Normal).unwrap(),
        UpsertOutcome::Rejected
    );
    // Priced card, variant without prices
    assert_eq!(
        session.commit("base1-2", Variant::ReverseHolofoil).unwrap(),
        UpsertOutcome::Rejected
    );
    assert!(session.ledger().unwrap().records().is_empty());
}

#[test]
fn test_mutations_and_undo_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);
    let inventory = session.create_inventory(&dir.path().join("mine")).unwrap();
    session.commit("base1-4", Variant::Holofoil).unwrap();
    session.commit("base1-2", Variant::Holofoil).unwrap();

    let charizard = RowKey::new("base1-4", Variant::Holofoil);
    let blastoise = RowKey::new("base1-2", Variant::Holofoil);
    let snapshot = session.ledger().unwrap().get(&charizard).cloned().unwrap();

    {
        let ledger = session.ledger_mut().unwrap();
        assert_eq!(ledger.increment(&blastoise).unwrap(), 2);
        assert_eq!(
            ledger.decrement(&charizard).unwrap(),
            DecrementOutcome::Deleted(snapshot.clone())
        );
        assert!(ledger.get(&charizard).is_none());
    }

    let on_disk = InventoryLedger::open(CsvInventoryStore::new(&inventory)).unwrap();
    assert_eq!(on_disk.records().len(), 1);

    {
        let ledger = session.ledger_mut().unwrap();
        assert_eq!(ledger.undo().unwrap(), UndoOutcome::Restored(snapshot.clone()));
        assert_eq!(
            ledger.undo().unwrap(),
            UndoOutcome::CountRestored {
                key: blastoise.clone(),
                count: 1
            }
        );
        assert_eq!(ledger.undo().unwrap(), UndoOutcome::NothingToUndo);
    }

    let on_disk = InventoryLedger::open(CsvInventoryStore::new(&inventory)).unwrap();
    assert_eq!(on_disk.records()[0], snapshot);
    assert_eq!(on_disk.get(&blastoise).map(|r| r.count), Some(1));
}

#[test]
fn test_open_existing_inventory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("existing.csv");
    std::fs::write(
        &path,
        "Name,ID,Series,Release Date,Market Price,High Price,Mid Price,Low Price,Card Type,Count\n\
         Charizard,base1-4,Base,1999/01/09,350.50,-,-,250.00,Holofoil,4\n",
    )
    .unwrap();

    let mut session = open_session(&dir);
    session.open_inventory(&path).unwrap();
    assert_eq!(
        session.commit("base1-4", Variant::Holofoil).unwrap(),
        UpsertOutcome::Incremented { count: 5 }
    );
}

#[test]
fn test_ledger_requires_open_inventory() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);
    assert!(session.ledger().is_none());
    assert!(matches!(session.ledger_mut(), Err(CollectionError::NoInventory)));
}

#[test]
fn test_reload_catalog_picks_up_changes() {
    let dir = TempDir::new().unwrap();
    let mut session = open_session(&dir);
    assert_eq!(session.catalog().len(), 3);

    std::fs::write(dir.path().join("cards.json"), r#"[{"id": "x-1", "name": "Mew"}]"#).unwrap();
    session.reload_catalog().unwrap();

    assert_eq!(session.catalog().len(), 1);
    assert_eq!(session.search("Mew", 0, Variant::Normal).total_count(), 1);
}
