use crate::similarity::{quick_ratio, ratio, DEFAULT_CUTOFF};
use log::debug;
use std::cmp::Ordering;

/// Default number of approximate matches returned when nothing contains the query
pub const DEFAULT_LIMIT: usize = 10;

/// Finds the catalog names matching a free-text query.
///
/// Names containing the query (case-insensitive) are exact matches; all of them
/// are returned, in index order, regardless of `limit`. Only when there is no
/// exact match are approximate matches computed: at most `limit` names whose
/// case-folded similarity to the query reaches the cutoff, best first.
pub fn match_names<'a, S: AsRef<str>>(query: &str, names: &'a [S], limit: usize) -> Vec<&'a str> {
    let folded_query = query.to_lowercase();
    let folded: Vec<(String, &'a str)> = names
        .iter()
        .map(|n| (n.as_ref().to_lowercase(), n.as_ref()))
        .collect();

    let exact: Vec<&'a str> = folded
        .iter()
        .filter(|(f, _)| f.contains(&folded_query))
        .map(|(_, name)| *name)
        .collect();
    if !exact.is_empty() {
        debug!("{} exact name matches for '{}'", exact.len(), query);
        return exact;
    }

    let close = close_matches(&folded_query, &folded, limit, DEFAULT_CUTOFF);
    debug!("{} approximate name matches for '{}'", close.len(), query);
    close
}

/// Approximate matching over the folded names.
/// Ties on score go to the lexically greater folded name.
fn close_matches<'a>(
    folded_query: &str,
    folded: &[(String, &'a str)],
    limit: usize,
    cutoff: f64,
) -> Vec<&'a str> {
    if limit == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(f64, &str)> = Vec::new();
    for (f, _) in folded {
        if candidates.iter().any(|(_, seen)| *seen == f.as_str()) {
            continue;
        }
        if quick_ratio(f, folded_query) < cutoff {
            continue;
        }
        let score = ratio(f, folded_query);
        if score >= cutoff {
            candidates.push((score, f.as_str()));
        }
    }

    candidates.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.1.cmp(a.1))
    });
    candidates.truncate(limit);

    // Every original spelling of a matched folded name, best match first
    let mut matches: Vec<&'a str> = candidates
        .iter()
        .flat_map(|(_, wanted)| {
            folded
                .iter()
                .filter(move |(f, _)| f.as_str() == *wanted)
                .map(|(_, name)| *name)
        })
        .collect();
    matches.truncate(limit);
    matches
}
