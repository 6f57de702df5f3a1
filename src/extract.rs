//! Field extraction from legacy nested-record text.
//!
//! Older catalog exports store the `set`, `images` and `tcgplayer` columns as the
//! string form of nested objects, e.g.
//! `Set(id='base1', name='Base', printedTotal=102, releaseDate='1999/01/09', ...)`.
//! The functions here pull the fields we need back out with pattern matching.
//! None of them fail: a field that cannot be found resolves to a documented default.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::{
    ImageSet, PricePoint, PriceRow, PriceSheet, SetInfo, TcgPlayerInfo, Variant, UNKNOWN_DATE,
    UNKNOWN_SET,
};

lazy_static! {
    // A quoted name must be followed by a separator so that apostrophes inside
    // double-quoted names ("Champion's Path") do not end the match early.
    static ref SET_NAME: Regex = Regex::new(r#"name=(?:'(.*?)'|"(.*?)")[, ]"#).unwrap();
    static ref RELEASE_DATE: Regex = Regex::new(r"releaseDate='(.*?)'").unwrap();
    static ref PRINTED_TOTAL: Regex = Regex::new(r"printedTotal=(\d+),").unwrap();
    static ref LARGE_IMAGE: Regex = Regex::new(r"large='(.*?)'").unwrap();
    static ref LARGE_IMAGE_FALLBACK: Regex = Regex::new(r"large=.*?'(https://.*?\.png)'").unwrap();
    static ref SMALL_IMAGE: Regex = Regex::new(r"small='(.*?)'").unwrap();
    static ref TCG_URL: Regex = Regex::new(r"url='(.*?)'").unwrap();
    static ref TCG_UPDATED_AT: Regex = Regex::new(r"updatedAt='(.*?)'").unwrap();
    static ref VARIANT_BLOCKS: Vec<(Variant, Regex)> = Variant::all()
        .iter()
        .map(|v| {
            let pattern = format!(r"{}\s*=\s*TCGPrice\((.*?)\)", v.api_key());
            (*v, Regex::new(&pattern).unwrap())
        })
        .collect();
    static ref LOW: Regex = price_field("low");
    static ref MID: Regex = price_field("mid");
    static ref HIGH: Regex = price_field("high");
    static ref MARKET: Regex = price_field("market");
    static ref DIRECT_LOW: Regex = price_field("directLow");
}

fn price_field(name: &str) -> Regex {
    Regex::new(&format!(r"{}=(\d+(?:\.\d+)?|None)?", name)).unwrap()
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts the set name, release date and printed total from set metadata text.
pub fn extract_set_info(raw: &str) -> SetInfo {
    let name = SET_NAME
        .captures(raw)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string());
    if name.is_none() {
        debug!("No set name in set metadata: {raw}");
    }

    SetInfo {
        name: name.unwrap_or_else(|| UNKNOWN_SET.to_string()),
        release_date: first_capture(&RELEASE_DATE, raw)
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        printed_total: extract_printed_total(raw),
    }
}

/// Extracts the `printedTotal=<digits>,` field from set metadata text.
pub fn extract_printed_total(raw: &str) -> Option<u32> {
    first_capture(&PRINTED_TOTAL, raw).and_then(|digits| digits.parse().ok())
}

/// Extracts image URLs, falling back to any quoted https PNG after `large=`.
pub fn extract_images(raw: &str) -> ImageSet {
    let large = first_capture(&LARGE_IMAGE, raw)
        .or_else(|| first_capture(&LARGE_IMAGE_FALLBACK, raw));

    ImageSet {
        small: first_capture(&SMALL_IMAGE, raw),
        large,
    }
}

fn price_point(pattern: &Regex, block: &str) -> PricePoint {
    match first_capture(pattern, block) {
        Some(token) if token != "None" => token
            .parse::<f64>()
            .map(PricePoint::Value)
            .unwrap_or(PricePoint::NotOffered),
        _ => PricePoint::NotOffered,
    }
}

/// Parses the inside of one `TCGPrice(...)` block.
pub fn extract_price_row(block: &str) -> PriceRow {
    PriceRow {
        low: price_point(&LOW, block),
        mid: price_point(&MID, block),
        high: price_point(&HIGH, block),
        market: price_point(&MARKET, block),
        direct_low: price_point(&DIRECT_LOW, block),
    }
}

/// Extracts the TCGplayer listing: url, update time and per-variant prices.
///
/// Blank or absent text means pricing was never recorded, so every field reads
/// "no data". A variant without a block gets a not-offered row; if that leaves
/// the whole sheet without a single value the sheet is escalated to "no data".
pub fn extract_tcgplayer(raw: Option<&str>) -> TcgPlayerInfo {
    let raw = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return TcgPlayerInfo::no_data(),
    };

    let mut prices = PriceSheet::not_offered();
    for (variant, pattern) in VARIANT_BLOCKS.iter() {
        if let Some(block) = first_capture(pattern, raw) {
            prices.set(*variant, extract_price_row(&block));
        }
    }

    TcgPlayerInfo {
        url: first_capture(&TCG_URL, raw),
        updated_at: first_capture(&TCG_UPDATED_AT, raw),
        prices: prices.normalized(),
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
