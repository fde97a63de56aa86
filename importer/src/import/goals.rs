//! Goals workbook import.
//!
//! Company goals are inserted first; the id of the first one becomes the
//! parent of every sales KPI goal, giving a one-level hierarchy.

use super::Importer;
use crate::backend::{insert_one, Backend};
use crate::error::ImportResult;
use crate::extract::{extract_company_goal, extract_sales_goal};
use crate::logs::{log_info, log_info_indent, log_success_indent};
use crate::mapping::truncate_chars;
use crate::models::{Goal, Table};
use crate::parser::Workbook;

pub const COMPANY_GOALS_SHEET: &str = "Company Goals";
pub const SALES_KPI_SHEET: &str = "Sales BD KPIs";

/// Characters of a goal name shown in progress lines.
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalsReport {
    pub company_goals: Vec<Goal>,
    /// Sales goals as sent, parent link included
    pub sales_goals: Vec<Goal>,
    /// Id of the first company goal created in this run
    pub parent_goal_id: Option<String>,
    pub inserted: usize,
}

impl<'a, B: Backend + ?Sized> Importer<'a, B> {
    /// Import company goals, then sales KPIs.
    pub async fn import_goals(&self) -> ImportResult<GoalsReport> {
        let path = &self.settings.sources.goals;
        let year = self.settings.target_year;
        self.announce("Goals", path);

        let mut workbook = Workbook::open(path)?;
        let company_sheet = workbook.read_sheet(COMPANY_GOALS_SHEET, 0)?;
        let kpi_sheet = workbook.read_sheet(SALES_KPI_SHEET, 0)?;

        let mut report = GoalsReport {
            company_goals: Vec::new(),
            sales_goals: Vec::new(),
            parent_goal_id: None,
            inserted: 0,
        };

        log_info_indent(format!("Processing: {}", COMPANY_GOALS_SHEET), 1);
        let goal_column = company_sheet.first_column().unwrap_or_default().to_string();
        for row in &company_sheet.rows {
            let Some(goal) = extract_company_goal(row, &goal_column, year) else {
                continue;
            };

            if self.dry_run {
                self.preview(&goal);
            } else {
                let row = serde_json::to_value(&goal)?;
                let id = insert_one(self.backend, Table::Goals, row).await?;
                report.parent_goal_id.get_or_insert(id);
                report.inserted += 1;
                log_success_indent(
                    format!(
                        "Inserted company goal: {}...",
                        truncate_chars(&goal.name, PREVIEW_CHARS)
                    ),
                    2,
                );
            }
            report.company_goals.push(goal);
        }

        log_info_indent(format!("Processing: {}", SALES_KPI_SHEET), 1);
        for row in &kpi_sheet.rows {
            let Some(mut goal) = extract_sales_goal(row, year) else {
                continue;
            };
            goal.parent_goal_id = report.parent_goal_id.clone();

            if self.dry_run {
                self.preview(&goal);
            } else {
                insert_one(self.backend, Table::Goals, serde_json::to_value(&goal)?).await?;
                report.inserted += 1;
                log_success_indent(
                    format!(
                        "Inserted sales goal: {}...",
                        truncate_chars(&goal.name, PREVIEW_CHARS)
                    ),
                    2,
                );
            }
            report.sales_goals.push(goal);
        }

        log_info(format!("Total goals {}imported: {}", self.would_be(), report.inserted));
        Ok(report)
    }

    fn preview(&self, goal: &Goal) {
        log_info_indent(
            format!("Would insert: {}...", truncate_chars(&goal.name, PREVIEW_CHARS)),
            2,
        );
    }
}
