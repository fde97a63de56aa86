//! Pipeline sheet rows to pursuits.

use serde_json::Value;

use crate::mapping::{
    map_deal_stage, map_deal_type_to_pursuit_type, parse_quarter_with_fallback, truncate_chars,
};
use crate::models::Pursuit;
use crate::parser::Row;

use super::text;

pub const DEAL_NAME_COLUMN: &str = "Deal Name";
pub const DEAL_STAGE_COLUMN: &str = "Deal Stage";
pub const TOTAL_AMOUNT_COLUMN: &str = "Total Amount";
pub const DEAL_OWNER_COLUMN: &str = "Deal Owner";
pub const DEAL_TYPE_COLUMN: &str = "Deal Type";
pub const QUARTER_COLUMN: &str = "Quarter to Close";
pub const VERTICAL_COLUMN: &str = "Vertical";

pub const PURSUIT_NAME_MAX_CHARS: usize = 255;

/// A pipeline row, normalized but not yet linked to an account plan.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRow {
    pub deal_name: String,
    pub company_name: String,
    /// Vertical given to the account plan if one has to be created
    pub vertical: Option<String>,
    /// `account_plan_id` is still unset
    pub pursuit: Pursuit,
}

/// Company part of a deal name.
///
/// `"Elekta: BOM & Vuln Mgmt"` → `Elekta`, `"Acme - Renewal"` → `Acme`,
/// anything else is the whole trimmed name. Blank results are `None`.
pub fn extract_company_from_deal(deal_name: &str) -> Option<String> {
    let company = match deal_name.split_once(':') {
        Some((head, _)) => head,
        None => match deal_name.split_once(" - ") {
            Some((head, _)) => head,
            None => deal_name,
        },
    };

    let company = company.trim();
    if company.is_empty() {
        None
    } else {
        Some(company.to_string())
    }
}

/// Deal amount; zero, text and empty cells all mean "no value".
fn deal_amount(value: Option<&Value>) -> Option<f64> {
    let amount = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    if amount == 0.0 || !amount.is_finite() {
        None
    } else {
        Some(amount)
    }
}

/// Build a deal from a pipeline row.
///
/// Returns `None` when the row has no deal name or no company can be
/// derived from it. Quarters without a year close in `fallback_year`.
pub fn extract_deal(row: &Row, fallback_year: i32) -> Option<DealRow> {
    let deal_name = text(row, DEAL_NAME_COLUMN)?;
    let company_name = extract_company_from_deal(&deal_name)?;

    let stage = map_deal_stage(text(row, DEAL_STAGE_COLUMN).as_deref());
    let deal_type = text(row, DEAL_TYPE_COLUMN);
    let target_quarter = text(row, QUARTER_COLUMN);
    let target_close_date = target_quarter
        .as_deref()
        .and_then(|q| parse_quarter_with_fallback(q, fallback_year));

    let pursuit = Pursuit {
        account_plan_id: None,
        name: truncate_chars(&deal_name, PURSUIT_NAME_MAX_CHARS),
        stage,
        probability: stage.probability(),
        estimated_value: deal_amount(row.get(TOTAL_AMOUNT_COLUMN)),
        deal_owner: text(row, DEAL_OWNER_COLUMN),
        pursuit_type: map_deal_type_to_pursuit_type(deal_type.as_deref(), stage),
        deal_type,
        target_quarter,
        target_close_date,
    };

    Some(DealRow {
        deal_name,
        company_name,
        vertical: text(row, VERTICAL_COLUMN),
        pursuit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PursuitType, Stage};
    use chrono::NaiveDate;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_extract_company_from_deal() {
        assert_eq!(extract_company_from_deal("Elekta: BOM & Vuln Mgmt").as_deref(), Some("Elekta"));
        assert_eq!(extract_company_from_deal("Acme - Renewal").as_deref(), Some("Acme"));
        assert_eq!(extract_company_from_deal("SoloName").as_deref(), Some("SoloName"));
    }

    #[test]
    fn test_colon_beats_dash() {
        assert_eq!(
            extract_company_from_deal("Philips - Imaging: SBOM").as_deref(),
            Some("Philips - Imaging")
        );
        // a bare hyphen is not a separator
        assert_eq!(extract_company_from_deal("Rohde-Schwarz").as_deref(), Some("Rohde-Schwarz"));
    }

    #[test]
    fn test_blank_company() {
        assert_eq!(extract_company_from_deal(": orphan deal"), None);
        assert_eq!(extract_company_from_deal("   "), None);
    }

    #[test]
    fn test_extract_full_deal() {
        let r = row(json!({
            "Deal Name": "Elekta: BOM & Vuln Mgmt",
            "Deal Stage": "purchasing engaged",
            "Total Amount": 120000,
            "Deal Owner": " Sam ",
            "Deal Type": "Maintenance Renewal",
            "Quarter to Close": "Q2 2027",
            "Vertical": "Medical Device",
        }));

        let deal = extract_deal(&r, 2026).unwrap();
        assert_eq!(deal.company_name, "Elekta");
        assert_eq!(deal.vertical.as_deref(), Some("Medical Device"));

        let p = &deal.pursuit;
        assert_eq!(p.account_plan_id, None);
        assert_eq!(p.name, "Elekta: BOM & Vuln Mgmt");
        assert_eq!(p.stage, Stage::Proposal);
        assert_eq!(p.probability, 60);
        assert_eq!(p.estimated_value, Some(120_000.0));
        assert_eq!(p.deal_owner.as_deref(), Some("Sam"));
        assert_eq!(p.deal_type.as_deref(), Some("Maintenance Renewal"));
        assert_eq!(p.target_quarter.as_deref(), Some("Q2 2027"));
        assert_eq!(p.target_close_date, NaiveDate::from_ymd_opt(2027, 6, 30));
        assert_eq!(p.pursuit_type, PursuitType::Renewal);
    }

    #[test]
    fn test_sparse_deal_defaults() {
        let r = row(json!({
            "Deal Name": "Acme - Pilot",
            "Deal Stage": null,
            "Total Amount": 0,
            "Quarter to Close": "Q3",
        }));

        let deal = extract_deal(&r, 2026).unwrap();
        let p = &deal.pursuit;
        assert_eq!(p.stage, Stage::Discovery);
        assert_eq!(p.probability, 10);
        assert_eq!(p.estimated_value, None);
        assert_eq!(p.target_close_date, NaiveDate::from_ymd_opt(2026, 9, 30));
        assert_eq!(p.pursuit_type, PursuitType::NewBusiness);
        assert_eq!(deal.vertical, None);
    }

    #[test]
    fn test_won_deal_is_recurring() {
        let r = row(json!({ "Deal Name": "Bosch: Fleet", "Deal Stage": "Win" }));
        let deal = extract_deal(&r, 2026).unwrap();
        assert_eq!(deal.pursuit.stage, Stage::ClosedWon);
        assert_eq!(deal.pursuit.pursuit_type, PursuitType::Recurring);
    }

    #[test]
    fn test_missing_deal_name() {
        let r = row(json!({ "Deal Name": null, "Deal Stage": "Win" }));
        assert!(extract_deal(&r, 2026).is_none());
    }

    #[test]
    fn test_long_name_truncated() {
        let long = format!("Acme: {}", "x".repeat(400));
        let r = row(json!({ "Deal Name": long }));
        let deal = extract_deal(&r, 2026).unwrap();
        assert_eq!(deal.pursuit.name.chars().count(), PURSUIT_NAME_MAX_CHARS);
        assert_eq!(deal.deal_name.len(), long.len());
    }

    #[test]
    fn test_text_amount() {
        assert_eq!(deal_amount(Some(&json!(" 5000.5 "))), Some(5000.5));
        assert_eq!(deal_amount(Some(&json!("TBD"))), None);
        assert_eq!(deal_amount(None), None);
    }
}
