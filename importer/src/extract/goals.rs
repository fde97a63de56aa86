//! Goals workbook rows to [`Goal`] records.

use crate::mapping::goals::{
    company_goal_target, company_goal_type, kpi_goal_type, kpi_region, kpi_target, kpi_vertical,
};
use crate::mapping::truncate_chars;
use crate::models::{Goal, GoalCategory};
use crate::parser::{cell_text, Row};

use super::text;

pub const KPI_COLUMN: &str = "KPIs";
pub const DESCRIPTION_COLUMN: &str = "Description";

pub const GOAL_NAME_MAX_CHARS: usize = 255;

fn goal_name(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .and_then(cell_text)
        .filter(|s| !s.trim().is_empty())
}

/// Company goal stated in `goal_column` (the sheet's first column).
pub fn extract_company_goal(row: &Row, goal_column: &str, target_year: i32) -> Option<Goal> {
    let goal_text = goal_name(row, goal_column)?;

    Some(Goal {
        name: truncate_chars(&goal_text, GOAL_NAME_MAX_CHARS),
        goal_type: company_goal_type(&goal_text),
        category: GoalCategory::Company,
        vertical: None,
        region: None,
        target_value: company_goal_target(&goal_text),
        target_year,
        current_value: 0.0,
        is_active: true,
        parent_goal_id: None,
    })
}

/// Sales KPI goal. The parent link is set by the importer.
pub fn extract_sales_goal(row: &Row, target_year: i32) -> Option<Goal> {
    let kpi_name = goal_name(row, KPI_COLUMN)?;
    let description = text(row, DESCRIPTION_COLUMN).unwrap_or_default();
    let kpi_text = format!("{} {}", kpi_name, description);

    Some(Goal {
        name: truncate_chars(&kpi_name, GOAL_NAME_MAX_CHARS),
        goal_type: kpi_goal_type(&kpi_name),
        category: GoalCategory::Sales,
        vertical: kpi_vertical(&kpi_text),
        region: kpi_region(&kpi_text),
        target_value: kpi_target(&kpi_text),
        target_year,
        current_value: 0.0,
        is_active: true,
        parent_goal_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalType, Region, Vertical};
    use serde_json::{json, Value};

    fn row(value: Value) -> Row {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_company_goal() {
        let r = row(json!({ "2026 Goals": "Reach $10M ARR", "Owner": "CEO" }));
        let goal = extract_company_goal(&r, "2026 Goals", 2026).unwrap();
        assert_eq!(goal.name, "Reach $10M ARR");
        assert_eq!(goal.goal_type, GoalType::Revenue);
        assert_eq!(goal.category, GoalCategory::Company);
        assert_eq!(goal.target_value, 10_000_000.0);
        assert_eq!(goal.target_year, 2026);
        assert_eq!(goal.current_value, 0.0);
        assert!(goal.is_active);
        assert_eq!(goal.vertical, None);
    }

    #[test]
    fn test_company_goal_skips_empty() {
        let r = row(json!({ "2026 Goals": null }));
        assert!(extract_company_goal(&r, "2026 Goals", 2026).is_none());
        let r = row(json!({ "2026 Goals": "  " }));
        assert!(extract_company_goal(&r, "2026 Goals", 2026).is_none());
    }

    #[test]
    fn test_sales_goal_reads_description() {
        let r = row(json!({
            "KPIs": "NA Medical bookings",
            "Description": "Close $2.5M with North America hospitals",
        }));
        let goal = extract_sales_goal(&r, 2027).unwrap();
        assert_eq!(goal.name, "NA Medical bookings");
        assert_eq!(goal.category, GoalCategory::Sales);
        assert_eq!(goal.goal_type, GoalType::Revenue);
        assert_eq!(goal.target_value, 2_500_000.0);
        assert_eq!(goal.vertical, Some(Vertical::MedicalDevice));
        assert_eq!(goal.region, Some(Region::NorthAmerica));
        assert_eq!(goal.target_year, 2027);
        assert_eq!(goal.parent_goal_id, None);
    }

    #[test]
    fn test_sales_goal_without_description() {
        let r = row(json!({ "KPIs": "10 New Logos" }));
        let goal = extract_sales_goal(&r, 2026).unwrap();
        assert_eq!(goal.goal_type, GoalType::NewLogos);
        assert_eq!(goal.target_value, 10.0);
        assert_eq!(goal.vertical, None);
        assert_eq!(goal.region, None);
    }

    #[test]
    fn test_sales_goal_requires_kpi() {
        let r = row(json!({ "KPIs": null, "Description": "$1M" }));
        assert!(extract_sales_goal(&r, 2026).is_none());
    }

    #[test]
    fn test_goal_name_truncated() {
        let long = "g".repeat(300);
        let r = row(json!({ "Goal": long }));
        let goal = extract_company_goal(&r, "Goal", 2026).unwrap();
        assert_eq!(goal.name.chars().count(), GOAL_NAME_MAX_CHARS);
    }
}
