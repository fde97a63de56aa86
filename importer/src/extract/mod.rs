//! Row extractors: one spreadsheet row in, one normalized record out.
//!
//! Sheets from different teams name the same column differently
//! ("Company Name" vs "Company"), so every field is looked up through an
//! ordered alias list with [`first_present`].

pub mod goals;
pub mod pipeline;
pub mod tam;

use serde_json::Value;

use crate::parser::{cell_text, Row};

pub use goals::{extract_company_goal, extract_sales_goal, GOAL_NAME_MAX_CHARS};
pub use pipeline::{extract_company_from_deal, extract_deal, DealRow};
pub use tam::extract_tam_account;

/// First alias present in the row with a non-null value.
///
/// Returns the matching column name alongside the value.
pub fn first_present<'r>(row: &'r Row, aliases: &[&str]) -> Option<(&'r str, &'r Value)> {
    aliases.iter().find_map(|alias| {
        row.get_key_value(*alias)
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.as_str(), v))
    })
}

/// Trimmed text of the first present alias; blank text counts as missing.
pub fn first_text(row: &Row, aliases: &[&str]) -> Option<String> {
    first_present(row, aliases)
        .and_then(|(_, v)| cell_text(v))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trimmed text of a single column.
pub fn text(row: &Row, column: &str) -> Option<String> {
    first_text(row, &[column])
}
