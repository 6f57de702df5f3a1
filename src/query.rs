//! Interprets raw search input as a name query and a set-number query.

use crate::catalog::Catalog;
use crate::matching::match_names;
use crate::models::CatalogEntry;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref FIRST_NUMBER: Regex = Regex::new(r"(\d+)").unwrap();
    static ref POSITION_OF_TOTAL: Regex = Regex::new(r"^(\d+)\s*/\s*(\d+)$").unwrap();
}

/// The structured readings of one raw input string
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// The raw input, used unchanged as the name query
    pub text: String,
    /// First run of digits anywhere in the input
    pub set_position: Option<u32>,
    /// Second number when the whole input reads `<position>/<total>`
    pub printed_total: Option<u32>,
}

impl QueryPlan {
    pub fn parse(input: &str) -> Self {
        let set_position = FIRST_NUMBER
            .captures(input)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());
        let printed_total = POSITION_OF_TOTAL
            .captures(input)
            .and_then(|caps| caps.get(2))
            .and_then(|m| m.as_str().parse().ok());

        Self {
            text: input.to_string(),
            set_position,
            printed_total,
        }
    }

    /// Entries whose name matches the query text
    pub fn name_candidates<'a>(&self, catalog: &'a Catalog, limit: usize) -> Vec<&'a CatalogEntry> {
        let matched: HashSet<&str> = match_names(&self.text, catalog.names(), limit)
            .into_iter()
            .collect();
        catalog
            .entries()
            .iter()
            .filter(|e| matched.contains(e.name.as_str()))
            .collect()
    }

    /// Entries at the requested set position, restricted to the printed total when one was given
    pub fn set_candidates<'a>(&self, catalog: &'a Catalog) -> Vec<&'a CatalogEntry> {
        let Some(position) = self.set_position else {
            return Vec::new();
        };
        catalog
            .entries()
            .iter()
            .filter(|e| e.set_position() == Some(position))
            .filter(|e| match self.printed_total {
                Some(total) => e.set.printed_total == Some(total),
                None => true,
            })
            .collect()
    }

    /// Union of both readings with identical rows removed, name matches first.
    pub fn candidates<'a>(&self, catalog: &'a Catalog, limit: usize) -> Vec<&'a CatalogEntry> {
        let by_name = self.name_candidates(catalog, limit);
        let by_number = self.set_candidates(catalog);
        debug!(
            "Query '{}': {} by name, {} by set number",
            self.text,
            by_name.len(),
            by_number.len()
        );
        dedup_rows(by_name.into_iter().chain(by_number))
    }
}

/// Drops rows equal to an earlier row, keeping first occurrences in order.
fn dedup_rows<'a>(rows: impl IntoIterator<Item = &'a CatalogEntry>) -> Vec<&'a CatalogEntry> {
    // Equal rows share an id, so only rows with the same id need comparing
    let mut kept_by_id: HashMap<&str, Vec<&CatalogEntry>> = HashMap::new();
    let mut unique = Vec::new();
    for row in rows {
        let same_id = kept_by_id.entry(row.id.as_str()).or_default();
        if same_id.iter().any(|kept| *kept == row) {
            continue;
        }
        same_id.push(row);
        unique.push(row);
    }
    unique
}
