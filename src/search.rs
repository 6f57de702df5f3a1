//! Search pipeline: plan → candidates → rank → page → display rows.

use crate::catalog::Catalog;
use crate::matching::DEFAULT_LIMIT;
use crate::models::{SearchResult, Variant};
use crate::pagination::{page_count, paginate, DEFAULT_PAGE_SIZE};
use crate::query::QueryPlan;
use crate::ranking::rank;
use log::{debug, info};

/// Tuning knobs for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub page_size: usize,
    /// Maximum number of approximate name matches
    pub name_limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            name_limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of ranked results
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage<'a> {
    pub results: Vec<SearchResult<'a>>,
    /// Number of ranked results across all pages
    pub total_count: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl SearchPage<'_> {
    pub fn page_count(&self) -> usize {
        page_count(self.total_count, self.page_size)
    }
}

/// Outcome of a search. Finding nothing is an outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    NoResults,
    Found(SearchPage<'a>),
}

impl<'a> SearchOutcome<'a> {
    pub fn total_count(&self) -> usize {
        match self {
            SearchOutcome::NoResults => 0,
            SearchOutcome::Found(page) => page.total_count,
        }
    }

    /// Results on the requested page; empty for no results or a page past the end
    pub fn results(&self) -> &[SearchResult<'a>] {
        match self {
            SearchOutcome::NoResults => &[],
            SearchOutcome::Found(page) => &page.results,
        }
    }
}

/// Runs a search and returns page `page_index` with prices for `variant`.
pub fn search<'a>(
    catalog: &'a Catalog,
    query: &str,
    page_index: usize,
    variant: Variant,
    options: &SearchOptions,
) -> SearchOutcome<'a> {
    debug!("Search input: {query}");
    let plan = QueryPlan::parse(query);
    let candidates = plan.candidates(catalog, options.name_limit);
    if candidates.is_empty() {
        info!("No cards found for '{query}'");
        return SearchOutcome::NoResults;
    }

    let ranked = rank(candidates, query);
    let total_count = ranked.len();
    let results = paginate(&ranked, page_index, options.page_size)
        .iter()
        .map(|&entry| SearchResult::new(entry, variant))
        .collect();
    debug!("Search '{query}': {total_count} ranked, showing page {page_index}");

    SearchOutcome::Found(SearchPage {
        results,
        total_count,
        page_index,
        page_size: options.page_size,
    })
}
