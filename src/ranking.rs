use crate::models::CatalogEntry;
use crate::similarity::ratio;
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Score given to a card whose name is exactly the query
pub const EXACT_NAME_SCORE: f64 = 1000.0;
/// Subtracted per character a name is longer than the query
pub const LENGTH_PENALTY: f64 = 0.01;
/// Sort date for cards without a readable release date
pub const FALLBACK_SORT_DATE: u32 = 2000_01_01;

/// Relevance of one candidate. Larger keys rank first.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub name_score: f64,
    /// Release date as YYYYMMDD
    pub release: u32,
    pub set_name: String,
}

impl SortKey {
    pub fn new(entry: &CatalogEntry, query: &str) -> Self {
        Self {
            name_score: name_score(&entry.name, query),
            release: sortable_date(&entry.set.release_date),
            set_name: entry.set.name.clone(),
        }
    }

    /// Field-by-field comparison: name score, then release, then set name
    pub fn compare(&self, other: &Self) -> Ordering {
        self.name_score
            .total_cmp(&other.name_score)
            .then_with(|| self.release.cmp(&other.release))
            .then_with(|| self.set_name.cmp(&other.set_name))
    }
}

/// Similarity of a card name to the raw query, penalising longer names.
pub fn name_score(name: &str, query: &str) -> f64 {
    if name == query {
        return EXACT_NAME_SCORE;
    }
    let excess = name.chars().count().saturating_sub(query.chars().count());
    ratio(name, query) - LENGTH_PENALTY * excess as f64
}

/// Release date as an 8-digit YYYYMMDD number; unreadable dates sort as 2000-01-01.
pub fn sortable_date(date: &str) -> u32 {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .ok()
        .and_then(|d| {
            let year = u32::try_from(d.year()).ok()?;
            Some(year * 10_000 + d.month() * 100 + d.day())
        })
        .unwrap_or(FALLBACK_SORT_DATE)
}

/// Orders candidates by descending sort key. Candidates with equal keys keep
/// their input order, so ranking the same input twice gives the same output.
pub fn rank<'a>(candidates: Vec<&'a CatalogEntry>, query: &str) -> Vec<&'a CatalogEntry> {
    let mut keyed: Vec<(SortKey, &'a CatalogEntry)> = candidates
        .into_iter()
        .map(|entry| (SortKey::new(entry, query), entry))
        .collect();
    keyed.sort_by(|a, b| b.0.compare(&a.0));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}
