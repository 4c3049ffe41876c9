//! Tabular query resolution.
//!
//! Answers a free-text question against a spreadsheet by ranking columns
//! on query-token overlap, optionally narrowing to a 4-digit year found in
//! the query, and formatting a best-effort answer string.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ColumnMatch, TabularDataset};

fn year_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").unwrap())
}

/// Scores every column name against the query's whitespace tokens and
/// returns the highest scorer. The score counts query tokens appearing as
/// substrings of the lower-cased column name; only a strictly greater
/// score replaces the running best, so the first column wins ties and an
/// all-zero scoreboard returns `None`.
pub fn best_column(table: &TabularDataset, query: &str) -> Option<ColumnMatch> {
    let query = query.to_lowercase();
    let tokens: Vec<&str> = query.split_whitespace().collect();

    let mut best: Option<ColumnMatch> = None;
    for name in &table.columns {
        let lower = name.to_lowercase();
        let score = tokens.iter().filter(|t| lower.contains(**t)).count();
        if score > best.as_ref().map_or(0, |b| b.score) {
            best = Some(ColumnMatch {
                name: name.clone(),
                score,
            });
        }
    }
    best
}

/// First 4-digit digit run in the query, if any.
pub fn extract_year(query: &str) -> Option<i64> {
    year_pattern()
        .find(query)
        .and_then(|m| m.as_str().parse().ok())
}

/// Resolves a question against the table.
///
/// When a best column, a year in the query, and a year column containing
/// that year all line up, the answer reads the best column's cell from the
/// first matching row. Everything else falls through to the universal
/// `"Best match: ..."` string. The year column is found by
/// case-insensitive name comparison, whatever casing the header uses.
pub fn resolve(table: &TabularDataset, query: &str) -> String {
    let best = best_column(table, query);

    if let (Some(matched), Some(year)) = (&best, extract_year(query)) {
        if let Some(value) = lookup(table, matched, year) {
            return format!("{} in {}: {}", matched.name, year, value);
        }
    }

    format!(
        "Best match: {}, but no exact data found.",
        best.as_ref().map_or("None", |m| m.name.as_str())
    )
}

/// Cell of `matched`'s column in the first row whose year column equals
/// `year`, rendered for display.
fn lookup(table: &TabularDataset, matched: &ColumnMatch, year: i64) -> Option<String> {
    let year_col = table
        .columns
        .iter()
        .position(|c| c.to_lowercase() == "year")?;
    let value_col = table.column_index(&matched.name)?;
    let row = table
        .rows
        .iter()
        .find(|row| row.get(year_col).is_some_and(|c| c.matches_year(year)))?;
    row.get(value_col).map(|c| c.to_string())
}
