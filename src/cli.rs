//! Interactive terminal menu

use inquire::{InquireError, Select, Text};
use std::path::PathBuf;
use tcg_collection::pagination::page_count;
use tcg_collection::setup::with_inventory_extension;
use tcg_collection::{
    format_inventory, format_search_outcome, CollectionResult, DecrementOutcome, InventoryDialogs,
    RowKey, SearchOutcome, Session, SetupChoice, UndoOutcome, UpsertOutcome, Variant,
};

const SELECT_EXISTING: &str = "Select an existing inventory file";
const CREATE_NEW: &str = "Create a new inventory file";
const CANCEL: &str = "Cancel";

/// Asks setup questions on the terminal
pub struct TerminalDialogs;

fn prompt_path(message: &str) -> Option<PathBuf> {
    match Text::new(message).prompt() {
        Ok(answer) if !answer.trim().is_empty() => Some(PathBuf::from(answer.trim())),
        _ => None,
    }
}

impl InventoryDialogs for TerminalDialogs {
    fn choose_setup(&mut self) -> SetupChoice {
        println!("No inventory file is configured.");
        let answer: Result<&str, InquireError> = Select::new(
            "What would you like to do?",
            vec![SELECT_EXISTING, CREATE_NEW, CANCEL],
        )
        .prompt();
        match answer {
            Ok(SELECT_EXISTING) => SetupChoice::SelectExisting,
            Ok(CREATE_NEW) => SetupChoice::CreateNew,
            _ => SetupChoice::Cancel,
        }
    }

    fn pick_existing(&mut self) -> Option<PathBuf> {
        let path = prompt_path("Path to the inventory file:")?;
        if path.is_file() {
            Some(path)
        } else {
            println!("{} is not a file.", path.display());
            None
        }
    }

    fn name_new(&mut self) -> Option<PathBuf> {
        let path = prompt_path("Name for the new inventory file:")?;
        let target = with_inventory_extension(&path);
        if target.exists() {
            println!("{} already exists; select it instead.", target.display());
            None
        } else {
            Some(path)
        }
    }
}

/// What the menu is currently showing
struct View {
    query: Option<String>,
    page: usize,
    variant: Variant,
}

impl View {
    fn show(&self, session: &Session) {
        if let Some(query) = &self.query {
            let outcome = session.search(query, self.page, self.variant);
            print!("{}", format_search_outcome(&outcome));
        }
    }

    fn last_page(&self, session: &Session) -> usize {
        let total = self
            .query
            .as_deref()
            .map(|q| session.search(q, 0, self.variant).total_count())
            .unwrap_or(0);
        page_count(total, session.options().page_size).saturating_sub(1)
    }
}

/// Lets the user pick one of the displayed results; returns its card id
fn pick_result(session: &Session, view: &View, message: &str) -> Option<String> {
    let outcome = match view.query.as_deref() {
        Some(query) => session.search(query, view.page, view.variant),
        None => SearchOutcome::NoResults,
    };
    let results = outcome.results();
    if results.is_empty() {
        println!("Search for a card first.");
        return None;
    }

    let labels: Vec<String> = results
        .iter()
        .map(|r| {
            format!(
                "{} ({}) - {} #{}",
                r.entry.name, r.entry.id, r.set_name, r.entry.number
            )
        })
        .collect();
    let choice = Select::new(message, labels).raw_prompt().ok()?;
    Some(results[choice.index].entry.id.clone())
}

/// Lets the user pick a collection row
fn pick_row(session: &Session, message: &str) -> Option<RowKey> {
    let Some(ledger) = session.ledger() else {
        println!("No inventory is open.");
        return None;
    };
    let records = ledger.records();
    if records.is_empty() {
        println!("Your collection is empty.");
        return None;
    }

    let labels: Vec<String> = records
        .iter()
        .map(|r| format!("{} ({}, {}) x{}", r.name, r.id, r.card_type, r.count))
        .collect();
    let choice = Select::new(message, labels).raw_prompt().ok()?;
    Some(records[choice.index].key())
}

fn add_to_collection(session: &mut Session, view: &View) -> CollectionResult<()> {
    let Some(card_id) = pick_result(session, view, "Add which card?") else {
        return Ok(());
    };
    match session.commit(&card_id, view.variant)? {
        UpsertOutcome::Added => println!("Added {} ({}).", card_id, view.variant),
        UpsertOutcome::Incremented { count } => {
            println!("You now have {} of {} ({}).", count, card_id, view.variant)
        }
        UpsertOutcome::Rejected => println!(
            "{} does not exist as {}; nothing added.",
            card_id, view.variant
        ),
    }
    Ok(())
}

fn adjust_row(session: &mut Session, action: &str) -> CollectionResult<()> {
    let Some(key) = pick_row(session, "Which row?") else {
        return Ok(());
    };
    let ledger = session.ledger_mut()?;
    match action {
        "+1" => {
            let count = ledger.increment(&key)?;
            println!("{key}: {count}");
        }
        "-1" => match ledger.decrement(&key)? {
            DecrementOutcome::Decremented { count } => println!("{key}: {count}"),
            DecrementOutcome::Deleted(record) => println!("Removed {}.", record.name),
        },
        _ => {
            let record = ledger.delete(&key)?;
            println!("Removed {}.", record.name);
        }
    }
    Ok(())
}

fn undo(session: &mut Session) -> CollectionResult<()> {
    match session.ledger_mut()?.undo()? {
        UndoOutcome::NothingToUndo => println!("Nothing to undo."),
        UndoOutcome::Restored(record) => println!("Restored {}.", record.name),
        UndoOutcome::CountRestored { key, count } => println!("{key}: back to {count}"),
    }
    Ok(())
}

fn fetch_image(session: &mut Session, view: &View) -> CollectionResult<()> {
    let Some(card_id) = pick_result(session, view, "Show image of which card?") else {
        return Ok(());
    };
    let Some(bytes) = session.image_for(&card_id)? else {
        println!("{card_id} has no image.");
        return Ok(());
    };
    match image::load_from_memory(bytes) {
        Ok(img) => println!(
            "{}: {}x{} image, {} bytes",
            card_id,
            img.width(),
            img.height(),
            bytes.len()
        ),
        Err(e) => println!("{card_id}: {} bytes, not decodable ({e})", bytes.len()),
    }
    if let Some(target) = prompt_path("Save image to (leave empty to skip):") {
        std::fs::write(&target, bytes)?;
        println!("Saved to {}.", target.display());
    }
    Ok(())
}

/// Runs the menu until the user exits. Failed actions are reported and the
/// menu carries on.
pub fn run_menu(session: &mut Session) {
    let mut view = View {
        query: None,
        page: 0,
        variant: Variant::default(),
    };

    loop {
        let menu_options: Vec<&str> = vec![
            "Search",
            "Next page",
            "Previous page",
            "Choose variant",
            "Add to collection",
            "View collection",
            "+1",
            "-1",
            "Delete row",
            "Undo",
            "New collection",
            "Fetch image",
            "Exit",
        ];
        let menu_ans: Result<&str, InquireError> =
            Select::new("What would you like to do?", menu_options).prompt();

        let result = match menu_ans {
            Ok("Search") => {
                if let Ok(query) = Text::new("Card name or number:").prompt() {
                    view.query = Some(query);
                    view.page = 0;
                    view.show(session);
                }
                Ok(())
            }
            Ok("Next page") => {
                view.page = (view.page + 1).min(view.last_page(session));
                view.show(session);
                Ok(())
            }
            Ok("Previous page") => {
                view.page = view.page.saturating_sub(1);
                view.show(session);
                Ok(())
            }
            Ok("Choose variant") => {
                if let Ok(variant) =
                    Select::new("Show prices for:", Variant::all().to_vec()).prompt()
                {
                    view.variant = variant;
                    view.show(session);
                }
                Ok(())
            }
            Ok("Add to collection") => add_to_collection(session, &view),
            Ok("View collection") => {
                match session.ledger() {
                    Some(ledger) => print!("{}", format_inventory(ledger.records())),
                    None => println!("No inventory is open."),
                }
                Ok(())
            }
            Ok(action @ ("+1" | "-1" | "Delete row")) => adjust_row(session, action),
            Ok("Undo") => undo(session),
            Ok("New collection") => match prompt_path("Name for the new inventory file:") {
                Some(path) => session.create_inventory(&path).map(|created| {
                    println!("Now using {}.", created.display());
                }),
                None => Ok(()),
            },
            Ok("Fetch image") => fetch_image(session, &view),
            Ok("Exit") | Err(InquireError::OperationInterrupted) => break,
            Ok(_) => {
                println!("Invalid choice");
                Ok(())
            }
            Err(_) => {
                println!("There was an error, please try again");
                Ok(())
            }
        };

        if let Err(e) = result {
            log::error!("{e}");
            println!("Error: {e}");
        }
    }
}
