//! Cell value normalizers.

use serde_json::Value;

use crate::models::FitTier;
use crate::parser::{cell_number, cell_text};

/// Revenue columns are expressed in billions.
const REVENUE_SCALE: f64 = 1_000_000_000.0;

/// Scale a revenue cell from billions to absolute currency units.
///
/// Only numeric cells count; text such as `"~2bn"` yields `None`.
pub fn clean_revenue(value: Option<&Value>) -> Option<f64> {
    value.and_then(cell_number).map(|v| v * REVENUE_SCALE)
}

/// Employee counts are kept as text: sheets mix `12000` with `"10k+"`.
pub fn clean_employees(value: Option<&Value>) -> Option<String> {
    let value = value?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .map(|i| i.to_string()),
        other => cell_text(other),
    }
}

/// Map a priority label ("High", "Tier 2", "3", ...) to a fit tier.
pub fn map_priority_to_tier(priority: Option<&str>) -> Option<FitTier> {
    let normalized = priority?.trim().to_lowercase();
    match normalized.as_str() {
        "high" | "a" | "1" | "tier 1" | "priority" => Some(FitTier::A),
        "medium" | "b" | "2" | "tier 2" => Some(FitTier::B),
        "low" | "c" | "3" | "tier 3" => Some(FitTier::C),
        _ => None,
    }
}

/// Keep at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
