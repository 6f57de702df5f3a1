//! Inventory ledger: the user's collection with an undo log.
//!
//! Rows are keyed by (card id, card type). Counts never drop below one: a
//! decrement at one deletes the row. Every mutation rewrites the whole store
//! before the in-memory rows advance, so a failed write leaves the ledger as it was.

use crate::error::{CollectionError, CollectionResult};
use crate::io::{read_inventory, write_inventory};
use crate::models::{InventoryRecord, RowKey, SearchResult};
use std::path::{Path, PathBuf};

/// Durable storage for the collection
pub trait InventoryStore {
    fn load(&self) -> CollectionResult<Vec<InventoryRecord>>;
    fn save(&self, records: &[InventoryRecord]) -> CollectionResult<()>;
}

/// Inventory kept in a CSV file, rewritten in full on every save
#[derive(Debug, Clone)]
pub struct CsvInventoryStore {
    path: PathBuf,
}

impl CsvInventoryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventoryStore for CsvInventoryStore {
    fn load(&self) -> CollectionResult<Vec<InventoryRecord>> {
        read_inventory(&self.path)
    }

    fn save(&self, records: &[InventoryRecord]) -> CollectionResult<()> {
        write_inventory(&self.path, records)
    }
}

/// What it takes to reverse one mutation
#[derive(Debug, Clone, PartialEq)]
pub enum UndoEntry {
    Delete {
        record: InventoryRecord,
        position: usize,
    },
    Increment {
        key: RowKey,
        previous_count: u32,
    },
    Decrement {
        key: RowKey,
        previous_count: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Added,
    Incremented { count: u32 },
    /// The variant has no prices for this card, so it does not exist
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecrementOutcome {
    Decremented { count: u32 },
    Deleted(InventoryRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UndoOutcome {
    NothingToUndo,
    Restored(InventoryRecord),
    CountRestored { key: RowKey, count: u32 },
}

pub struct InventoryLedger<S> {
    store: S,
    records: Vec<InventoryRecord>,
    undo_log: Vec<UndoEntry>,
}

impl<S: InventoryStore> InventoryLedger<S> {
    /// Loads the collection from `store`
    pub fn open(store: S) -> CollectionResult<Self> {
        let records = store.load()?;
        Ok(Self {
            store,
            records,
            undo_log: Vec::new(),
        })
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn get(&self, key: &RowKey) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.matches(key))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of mutations that can still be undone
    pub fn undo_depth(&self) -> usize {
        self.undo_log.len()
    }

    fn position(&self, key: &RowKey) -> CollectionResult<usize> {
        self.records
            .iter()
            .position(|r| r.matches(key))
            .ok_or_else(|| CollectionError::RowNotFound(key.to_string()))
    }

    /// Persists `next` and only then makes it the current state
    fn commit(
        &mut self,
        operation: &'static str,
        next: Vec<InventoryRecord>,
    ) -> CollectionResult<()> {
        if let Err(e) = self.store.save(&next) {
            log::error!("Inventory {operation} not saved: {e}");
            return Err(CollectionError::persistence(operation, e));
        }
        self.records = next;
        Ok(())
    }

    /// Adds one copy of a displayed card, creating its row if needed.
    /// Variants without any price are rejected.
    pub fn upsert(&mut self, result: &SearchResult<'_>) -> CollectionResult<UpsertOutcome> {
        if !result.prices.is_offered() {
            log::info!(
                "Rejected {} ({}): variant does not exist",
                result.entry.id,
                result.variant
            );
            return Ok(UpsertOutcome::Rejected);
        }

        let record = InventoryRecord::from_result(result);
        let mut next = self.records.clone();
        let outcome = match next.iter_mut().find(|r| r.matches(&record.key())) {
            Some(existing) => {
                existing.count = added_count(existing, 1)?;
                UpsertOutcome::Incremented {
                    count: existing.count,
                }
            }
            None => {
                next.push(record);
                UpsertOutcome::Added
            }
        };

        self.commit("add", next)?;
        log::info!(
            "Collection: {} ({}) {:?}",
            result.entry.name,
            result.variant,
            outcome
        );
        Ok(outcome)
    }

    /// Adds one to a row's count
    pub fn increment(&mut self, key: &RowKey) -> CollectionResult<u32> {
        let index = self.position(key)?;
        let previous_count = self.records[index].count;
        let count = added_count(&self.records[index], 1)?;
        let mut next = self.records.clone();
        next[index].count = count;

        self.commit("increment", next)?;
        self.undo_log.push(UndoEntry::Increment {
            key: key.clone(),
            previous_count,
        });
        log::info!("Incremented {key} to {count}");
        Ok(count)
    }

    /// Removes one from a row's count, deleting the row when it would reach zero
    pub fn decrement(&mut self, key: &RowKey) -> CollectionResult<DecrementOutcome> {
        let index = self.position(key)?;
        let previous_count = self.records[index].count;
        if previous_count <= 1 {
            return self.delete(key).map(DecrementOutcome::Deleted);
        }

        let mut next = self.records.clone();
        next[index].count = previous_count - 1;

        self.commit("decrement", next)?;
        self.undo_log.push(UndoEntry::Decrement {
            key: key.clone(),
            previous_count,
        });
        log::info!("Decremented {key} to {}", previous_count - 1);
        Ok(DecrementOutcome::Decremented {
            count: previous_count - 1,
        })
    }

    /// Removes a row, remembering it for undo
    pub fn delete(&mut self, key: &RowKey) -> CollectionResult<InventoryRecord> {
        let position = self.position(key)?;
        let mut next = self.records.clone();
        let record = next.remove(position);

        self.commit("delete", next)?;
        self.undo_log.push(UndoEntry::Delete {
            record: record.clone(),
            position,
        });
        log::info!(
            "Removed {} ({}) from collection",
            record.name,
            record.card_type
        );
        Ok(record)
    }

    /// Reverses the most recent increment, decrement or delete. The entry
    /// stays in the log when the change cannot be saved.
    pub fn undo(&mut self) -> CollectionResult<UndoOutcome> {
        let Some(entry) = self.undo_log.last() else {
            log::info!("Nothing to undo");
            return Ok(UndoOutcome::NothingToUndo);
        };

        let mut next = self.records.clone();
        let outcome = match entry {
            UndoEntry::Delete { record, position } => {
                // The same card may have been added again since the delete
                match next.iter_mut().find(|r| r.matches(&record.key())) {
                    Some(existing) => {
                        existing.count = added_count(existing, record.count)?;
                        UndoOutcome::Restored(existing.clone())
                    }
                    None => {
                        next.insert((*position).min(next.len()), record.clone());
                        UndoOutcome::Restored(record.clone())
                    }
                }
            }
            UndoEntry::Increment {
                key,
                previous_count,
            }
            | UndoEntry::Decrement {
                key,
                previous_count,
            } => {
                let Some(row) = next.iter_mut().find(|r| r.matches(key)) else {
                    log::warn!("Undo skipped: {key} is no longer in the collection");
                    let missing = key.to_string();
                    self.undo_log.pop();
                    return Err(CollectionError::RowNotFound(missing));
                };
                row.count = *previous_count;
                UndoOutcome::CountRestored {
                    key: key.clone(),
                    count: *previous_count,
                }
            }
        };

        self.commit("undo", next)?;
        self.undo_log.pop();
        log::info!("Undo: {outcome:?}");
        Ok(outcome)
    }
}

fn added_count(record: &InventoryRecord, extra: u32) -> CollectionResult<u32> {
    record
        .count
        .checked_add(extra)
        .ok_or_else(|| CollectionError::CountOverflow(record.key().to_string()))
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
