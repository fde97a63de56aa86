//! TAM sheet rows to [`TamAccount`] records.

use crate::mapping::{clean_employees, clean_revenue, map_priority_to_tier};
use crate::models::{TamAccount, Vertical, TAM_DEFAULT_STATUS};
use crate::parser::{cell_text, Row};

use super::{first_present, first_text};

pub const COMPANY_COLUMNS: &[&str] = &["Company Name", "Company", "Company name"];
pub const COUNTRY_COLUMNS: &[&str] = &["Country", "Region"];
pub const REVENUE_COLUMNS: &[&str] = &["Revenue ($Bn)", "Revenue", "Revenue Est"];
pub const EMPLOYEE_COLUMNS: &[&str] = &["Employees", "Number of employees"];
pub const PRIORITY_COLUMNS: &[&str] = &["2026 Priority", "2026 Action", "C2A Fit"];

/// Annotation columns folded into the summary, with their label.
pub const NOTE_COLUMNS: &[(&str, &str)] = &[
    ("Status Notes", ""),
    ("C2A Relationship", "Relationship: "),
    ("Regulatory Pressures", "Regulatory: "),
    ("Key Segment", "Segment: "),
];

pub const NOTE_SEPARATOR: &str = "; ";

/// Build a TAM account, or `None` when the row names no company.
pub fn extract_tam_account(row: &Row, vertical: Vertical) -> Option<TamAccount> {
    let company_name = first_text(row, COMPANY_COLUMNS)?;

    let priority = first_text(row, PRIORITY_COLUMNS);
    let fit_tier = map_priority_to_tier(priority.as_deref());

    Some(TamAccount {
        company_name,
        vertical,
        headquarters: first_text(row, COUNTRY_COLUMNS),
        employee_count: clean_employees(first_present(row, EMPLOYEE_COLUMNS).map(|(_, v)| v)),
        fit_tier,
        fit_rationale: priority,
        company_summary: summary_notes(row),
        status: TAM_DEFAULT_STATUS.to_string(),
        estimated_deal_value: clean_revenue(first_present(row, REVENUE_COLUMNS).map(|(_, v)| v)),
    })
}

fn summary_notes(row: &Row) -> Option<String> {
    let notes: Vec<String> = NOTE_COLUMNS
        .iter()
        .filter_map(|(column, label)| {
            row.get(*column)
                .and_then(cell_text)
                .map(|note| format!("{}{}", label, note))
        })
        .collect();

    if notes.is_empty() {
        None
    } else {
        Some(notes.join(NOTE_SEPARATOR))
    }
}
