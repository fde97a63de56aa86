//! Pipeline workbook import.
//!
//! Every deal becomes a pursuit under an account plan named after the
//! deal's company. Plans are looked up case-insensitively and created on
//! first use, so one company gets exactly one plan per run.

use std::collections::HashMap;

use serde_json::Value;

use super::{read_sheets, Importer};
use crate::backend::{insert_one, returned_id, Backend};
use crate::error::{BackendResult, ImportResult};
use crate::extract::pipeline::DEAL_NAME_COLUMN;
use crate::extract::{extract_deal, text, DealRow};
use crate::logs::{log_info, log_info_indent, log_success_indent, log_warning};
use crate::mapping::truncate_chars;
use crate::models::{AccountPlan, Pursuit, Stage, Table};

pub const PIPELINE_SHEET: &str = "Pipeline";

/// Deals previewed in a dry run.
const PREVIEW_DEALS: usize = 5;
const PREVIEW_CHARS: usize = 50;

/// Account plan ids keyed by lowercase account name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPlanCache {
    ids: HashMap<String, String>,
}

impl AccountPlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `account_plans` rows carrying `account_name` and
    /// `account_plan_id`. Rows without a name are ignored.
    pub fn from_rows(rows: &[Value]) -> BackendResult<Self> {
        let mut cache = Self::new();
        for row in rows {
            let Some(name) = row.get("account_name").and_then(Value::as_str) else {
                continue;
            };
            cache.insert(name, returned_id(Table::AccountPlans, row)?);
        }
        Ok(cache)
    }

    pub fn get(&self, account_name: &str) -> Option<&str> {
        self.ids.get(&account_name.to_lowercase()).map(String::as_str)
    }

    pub fn insert(&mut self, account_name: &str, id: String) {
        self.ids.insert(account_name.to_lowercase(), id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Closed-won, closed-lost and open deal counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageSummary {
    pub closed_won: usize,
    pub closed_lost: usize,
    pub active: usize,
    /// Sum of estimated values over open deals
    pub active_value: f64,
}

impl StageSummary {
    pub fn from_pursuits<'p>(pursuits: impl IntoIterator<Item = &'p Pursuit>) -> Self {
        let mut summary = Self::default();
        for pursuit in pursuits {
            if !pursuit.stage.is_closed() {
                summary.active += 1;
                summary.active_value += pursuit.estimated_value.unwrap_or(0.0);
            } else if pursuit.stage == Stage::ClosedWon {
                summary.closed_won += 1;
            } else {
                summary.closed_lost += 1;
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Rows with a deal name
    pub deals: usize,
    /// Account plans that existed before the run
    pub existing_accounts: usize,
    pub accounts_created: usize,
    /// Pursuits as built; linked to their plan in a real run
    pub pursuits: Vec<Pursuit>,
    pub pursuits_inserted: usize,
    pub summary: StageSummary,
}

impl<'a, B: Backend + ?Sized> Importer<'a, B> {
    /// Import pipeline deals as account plans and pursuits.
    pub async fn import_pipeline(&self) -> ImportResult<PipelineReport> {
        let path = &self.settings.sources.pipeline;
        self.announce("Pipeline", path);

        let sheet = read_sheets(path, &[(PIPELINE_SHEET, 0)])?.remove(0);
        if !sheet.has_column(DEAL_NAME_COLUMN) {
            log_warning(format!(
                "Sheet '{}' has no '{}' column",
                PIPELINE_SHEET, DEAL_NAME_COLUMN
            ));
        }

        let named_rows: Vec<_> = sheet
            .rows
            .iter()
            .filter(|row| text(row, DEAL_NAME_COLUMN).is_some())
            .collect();
        log_info_indent(format!("Found {} deals", named_rows.len()), 1);

        let deals: Vec<DealRow> = named_rows
            .iter()
            .filter_map(|row| extract_deal(row, self.settings.fallback_quarter_year))
            .collect();

        let mut report = PipelineReport {
            deals: named_rows.len(),
            existing_accounts: 0,
            accounts_created: 0,
            pursuits: Vec::with_capacity(deals.len()),
            pursuits_inserted: 0,
            summary: StageSummary::default(),
        };

        if self.dry_run {
            for deal in deals.iter().take(PREVIEW_DEALS) {
                log_info_indent(
                    format!(
                        "Would create: {} -> {}...",
                        deal.company_name,
                        truncate_chars(&deal.deal_name, PREVIEW_CHARS)
                    ),
                    2,
                );
            }
            report.pursuits = deals.into_iter().map(|d| d.pursuit).collect();
        } else {
            let existing = self
                .backend
                .select(Table::AccountPlans, &["account_plan_id", "account_name"])
                .await?;
            let mut cache = AccountPlanCache::from_rows(&existing)?;
            report.existing_accounts = cache.len();
            log_info_indent(format!("Found {} existing account plans", cache.len()), 1);

            for deal in deals {
                let account_plan_id = match cache.get(&deal.company_name) {
                    Some(id) => id.to_string(),
                    None => {
                        let plan = AccountPlan::prospect(
                            deal.company_name.as_str(),
                            deal.vertical.clone(),
                        );
                        let row = serde_json::to_value(&plan)?;
                        let id = insert_one(self.backend, Table::AccountPlans, row).await?;
                        cache.insert(&deal.company_name, id.clone());
                        report.accounts_created += 1;
                        log_success_indent(
                            format!("Created account plan: {}", deal.company_name),
                            2,
                        );
                        id
                    }
                };

                let mut pursuit = deal.pursuit;
                pursuit.account_plan_id = Some(account_plan_id);
                insert_one(self.backend, Table::Pursuits, serde_json::to_value(&pursuit)?).await?;
                report.pursuits_inserted += 1;
                report.pursuits.push(pursuit);
            }
        }

        report.summary = StageSummary::from_pursuits(&report.pursuits);

        log_info(format!("Account plans created: {}", report.accounts_created));
        let imported = if self.dry_run {
            report.deals
        } else {
            report.pursuits_inserted
        };
        log_info(format!("Pursuits {}imported: {}", self.would_be(), imported));
        log_info(format!(
            "Stages: {} won, {} lost, {} active (${:.0} open pipeline)",
            report.summary.closed_won,
            report.summary.closed_lost,
            report.summary.active,
            report.summary.active_value
        ));

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::config::PIPELINE_FILE;
    use crate::import::fixtures;
    use crate::logs::{drain, LOG_BROADCASTER};
    use crate::models::PursuitType;
    use serde_json::json;
    use std::path::Path;

    const PIPELINE_CSV: &str = "\
Deal Name,Deal Stage,Total Amount,Deal Owner,Deal Type,Quarter to Close,Vertical
Elekta: BOM & Vuln Mgmt,Purchasing Engaged,120000,Sam,New Business,Q2 2027,Medical Device
elekta: Renewal 2026,Win,50000,Sam,Maintenance Renewal,Q1,Medical Device
,Win,999,Nobody,,,
Acme - Pilot,Interested,0,Lee,,Q3 2026,Industrial
Bosch: Fleet,Lost,80000,Kim,,Q4 2026,Automotive
Philips: Imaging,Negotiate,200000,Sam,Upsell,Q4 2026,Medical Device
Siemens: OT,Demo,30000,Lee,,Q1 2027,Industrial
";

    fn write_pipeline(dir: &Path) {
        fixtures::write_sheet(dir, PIPELINE_FILE, PIPELINE_SHEET, PIPELINE_CSV);
    }

    #[test]
    fn test_cache_is_case_insensitive() {
        let mut cache = AccountPlanCache::new();
        assert!(cache.is_empty());
        cache.insert("Elekta", "ap-1".to_string());
        assert_eq!(cache.get("ELEKTA"), Some("ap-1"));
        assert_eq!(cache.get("elekta"), Some("ap-1"));
        assert_eq!(cache.get("Acme"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_from_rows() {
        let rows = vec![
            json!({ "account_plan_id": "ap-1", "account_name": "Elekta" }),
            json!({ "account_plan_id": "ap-2", "account_name": null }),
            json!({ "account_plan_id": 7, "account_name": "Acme" }),
        ];
        let cache = AccountPlanCache::from_rows(&rows).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("acme"), Some("7"));
    }

    #[test]
    fn test_stage_summary() {
        let pursuit = |stage: Stage, value: Option<f64>| Pursuit {
            account_plan_id: None,
            name: "d".into(),
            stage,
            probability: stage.probability(),
            estimated_value: value,
            deal_owner: None,
            deal_type: None,
            target_quarter: None,
            target_close_date: None,
            pursuit_type: PursuitType::NewBusiness,
        };
        let pursuits = vec![
            pursuit(Stage::ClosedWon, Some(10.0)),
            pursuit(Stage::ClosedLost, Some(20.0)),
            pursuit(Stage::Demo, Some(30.0)),
            pursuit(Stage::Discovery, None),
        ];
        let summary = StageSummary::from_pursuits(&pursuits);
        assert_eq!(summary.closed_won, 1);
        assert_eq!(summary.closed_lost, 1);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.active_value, 30.0);
    }

    #[tokio::test]
    async fn test_one_account_plan_per_company() {
        let dir = tempfile::tempdir().unwrap();
        write_pipeline(dir.path());
        let settings = fixtures::settings(dir.path());
        let backend = MemoryBackend::new();

        let report = Importer::new(&backend, &settings, false).import_pipeline().await.unwrap();

        assert_eq!(report.deals, 6);
        assert_eq!(report.accounts_created, 5);
        assert_eq!(report.pursuits_inserted, 6);

        let plans = backend.rows(Table::AccountPlans);
        assert_eq!(plans.len(), 5);
        assert_eq!(plans[0]["account_name"], "Elekta");
        assert_eq!(plans[0]["account_type"], "Prospect");
        assert_eq!(plans[0]["vertical"], "Medical Device");

        let pursuits = backend.rows(Table::Pursuits);
        assert_eq!(pursuits.len(), 6);
        assert_eq!(pursuits[0]["account_plan_id"], plans[0]["account_plan_id"]);
        assert_eq!(pursuits[1]["account_plan_id"], plans[0]["account_plan_id"]);
        assert_eq!(pursuits[1]["stage"], "Closed Won");
        assert_eq!(pursuits[1]["pursuit_type"], "renewal");
        assert_eq!(pursuits[1]["target_close_date"], "2026-03-31");
        assert_eq!(pursuits[0]["probability"], 60);
        assert!(pursuits[2]["estimated_value"].is_null());
        assert_eq!(pursuits[4]["pursuit_type"], "expansion");
    }

    #[tokio::test]
    async fn test_existing_account_plans_are_reused() {
        let dir = tempfile::tempdir().unwrap();
        write_pipeline(dir.path());
        let settings = fixtures::settings(dir.path());
        let backend = MemoryBackend::new();
        let stored = backend
            .insert(
                Table::AccountPlans,
                vec![json!({
                    "account_name": "ACME",
                    "account_type": "Customer",
                    "vertical": null
                })],
            )
            .await
            .unwrap();
        let acme_id = stored[0]["account_plan_id"].clone();

        let report = Importer::new(&backend, &settings, false).import_pipeline().await.unwrap();

        assert_eq!(report.existing_accounts, 1);
        assert_eq!(report.accounts_created, 4);
        assert_eq!(backend.count(Table::AccountPlans), 5);

        let acme = backend
            .rows(Table::Pursuits)
            .into_iter()
            .find(|p| p["name"] == "Acme - Pilot")
            .unwrap();
        assert_eq!(acme["account_plan_id"], acme_id);
    }

    #[tokio::test]
    async fn test_stage_summary_in_report() {
        let dir = tempfile::tempdir().unwrap();
        write_pipeline(dir.path());
        let settings = fixtures::settings(dir.path());
        let backend = MemoryBackend::new();

        let report = Importer::new(&backend, &settings, false).import_pipeline().await.unwrap();
        assert_eq!(
            report.summary,
            StageSummary {
                closed_won: 1,
                closed_lost: 1,
                active: 4,
                active_value: 350_000.0,
            }
        );
    }

    #[tokio::test]
    async fn test_pipeline_dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_pipeline(dir.path());
        let settings = fixtures::settings(dir.path());
        let backend = MemoryBackend::new();

        let mut rx = LOG_BROADCASTER.subscribe();
        let report = Importer::new(&backend, &settings, true).import_pipeline().await.unwrap();

        assert_eq!(report.deals, 6);
        assert_eq!(report.accounts_created, 0);
        assert_eq!(report.pursuits_inserted, 0);
        assert_eq!(report.pursuits.len(), 6);
        assert!(report.pursuits.iter().all(|p| p.account_plan_id.is_none()));
        assert_eq!(backend.count(Table::AccountPlans), 0);
        assert_eq!(backend.count(Table::Pursuits), 0);

        let previews: Vec<String> = drain(&mut rx)
            .into_iter()
            .map(|e| e.message)
            .filter(|m| m.starts_with("Would create: "))
            .collect();
        let expected = "Would create: Elekta -> Elekta: BOM & Vuln Mgmt...".to_string();
        assert!(previews.contains(&expected));
        assert!(previews.contains(&"Would create: Philips -> Philips: Imaging...".to_string()));
        assert!(!previews.iter().any(|m| m.contains("Siemens: OT")));
    }
}
