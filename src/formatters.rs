use crate::models::{InventoryRecord, SearchResult};
use crate::search::{SearchOutcome, SearchPage};

fn pad(cells: &[String], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    let mut output = pad(&header, &widths);
    let rule_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    output.push_str(&"-".repeat(rule_len));
    output.push('\n');
    for row in rows {
        output.push_str(&pad(row, &widths));
    }
    output
}

fn result_row(position: usize, result: &SearchResult<'_>) -> Vec<String> {
    let card = result.entry;
    vec![
        position.to_string(),
        card.name.clone(),
        card.id.clone(),
        card.number.clone(),
        result.set_name.clone(),
        result.release_date.clone(),
        result.prices.market.to_string(),
        result.prices.high.to_string(),
        result.prices.mid.to_string(),
        result.prices.low.to_string(),
    ]
}

/// Renders one page of search results, numbered from 1 within the page
pub fn format_results_page(page: &SearchPage<'_>) -> String {
    let rows: Vec<Vec<String>> = page
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| result_row(i + 1, result))
        .collect();

    let variant = page
        .results
        .first()
        .map(|r| r.variant.label())
        .unwrap_or_default();
    let mut output = table(
        &["#", "Name", "ID", "No.", "Series", "Release Date", "Market", "High", "Mid", "Low"],
        &rows,
    );
    output.push_str(&format!(
        "Page {} of {} ({} results, {} prices)\n",
        page.page_index + 1,
        page.page_count().max(1),
        page.total_count,
        variant
    ));
    output
}

pub fn format_search_outcome(outcome: &SearchOutcome<'_>) -> String {
    match outcome {
        SearchOutcome::NoResults => "No cards found.\n".to_string(),
        SearchOutcome::Found(page) if page.results.is_empty() => format!(
            "No results on page {} ({} results in total).\n",
            page.page_index + 1,
            page.total_count
        ),
        SearchOutcome::Found(page) => format_results_page(page),
    }
}

/// Renders the collection with a running total of cards held
pub fn format_inventory(records: &[InventoryRecord]) -> String {
    if records.is_empty() {
        return "Your collection is empty.\n".to_string();
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.name.clone(),
                r.id.clone(),
                r.series.clone(),
                r.card_type.clone(),
                r.market_price.clone(),
                r.count.to_string(),
            ]
        })
        .collect();

    let mut output = table(
        &["#", "Name", "ID", "Series", "Card Type", "Market", "Count"],
        &rows,
    );
    let total: u64 = records.iter().map(|r| u64::from(r.count)).sum();
    output.push_str("========================\n");
    output.push_str(&format!("{} rows, {} cards\n", records.len(), total));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogEntry, ImageSet, SetInfo, TcgPlayerInfo, Variant};

    fn record(name: &str, count: u32) -> InventoryRecord {
        InventoryRecord {
            name: name.to_string(),
            id: format!("{}-1", name.to_lowercase()),
            series: "Base".to_string(),
            release_date: "1999/01/09".to_string(),
            market_price: "1.00".to_string(),
            high_price: "-".to_string(),
            mid_price: "-".to_string(),
            low_price: "-".to_string(),
            card_type: "Normal".to_string(),
            count,
        }
    }

    #[test]
    fn empty_inventory_message() {
        assert_eq!(format_inventory(&[]), "Your collection is empty.\n");
    }

    #[test]
    fn inventory_columns_align_and_total() {
        let output = format_inventory(&[record("Mew", 2), record("Charizard", 3)]);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("# | Name      | ID"));
        assert!(lines[2].starts_with("1 | Mew       | mew-1"));
        assert!(lines[3].starts_with("2 | Charizard | charizard-1"));
        assert!(output.ends_with("2 rows, 5 cards\n"));
    }

    #[test]
    fn results_page_shows_prices_and_footer() {
        let entry = CatalogEntry {
            id: "base1-58".to_string(),
            name: "Pikachu".to_string(),
            number: "58".to_string(),
            set: SetInfo::default(),
            images: ImageSet::default(),
            tcgplayer: TcgPlayerInfo::no_data(),
        };
        let page = SearchPage {
            results: vec![SearchResult::new(&entry, Variant::Holofoil)],
            total_count: 21,
            page_index: 1,
            page_size: 20,
        };

        let output = format_results_page(&page);

        assert!(output.contains("Unknown Set"));
        assert!(output.contains("no data"));
        assert!(output.ends_with("Page 2 of 2 (21 results, Holofoil prices)\n"));
    }

    #[test]
    fn no_results_message() {
        assert_eq!(
            format_search_outcome(&SearchOutcome::NoResults),
            "No cards found.\n"
        );
    }
}
