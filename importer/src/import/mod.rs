//! Import orchestration.
//!
//! An [`Importer`] ties a [`Backend`], the run settings and the dry-run flag
//! together. Each import reads one workbook, turns its rows into records
//! with the [`crate::extract`] functions and then either previews them or
//! writes them to the backend in source order.
//!
//! # Example
//!
//! ```rust,ignore
//! use scout_import::backend::SupabaseClient;
//! use scout_import::config::{Config, ImportSettings};
//! use scout_import::import::{ImportSelection, Importer};
//!
//! let config = Config::from_env()?;
//! let backend = SupabaseClient::new(&config.credentials);
//! let settings = ImportSettings::default();
//!
//! let importer = Importer::new(&backend, &settings, false);
//! let report = importer.run(ImportSelection::all()).await?;
//! ```

pub mod goals;
pub mod pipeline;
pub mod tam;

use std::path::Path;

use crate::backend::Backend;
use crate::config::ImportSettings;
use crate::error::ImportResult;
use crate::logs::log_info;
use crate::parser::{Sheet, Workbook};

pub use goals::GoalsReport;
pub use pipeline::{AccountPlanCache, PipelineReport, StageSummary};
pub use tam::{SheetSummary, TamReport, TamSheet, TAM_BATCH_SIZE, TAM_SHEETS};

/// Which imports to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSelection {
    pub tam: bool,
    pub goals: bool,
    pub pipeline: bool,
}

impl ImportSelection {
    pub fn all() -> Self {
        Self {
            tam: true,
            goals: true,
            pipeline: true,
        }
    }

    /// Resolve command-line flags. `all`, or no flag at all, selects
    /// everything.
    pub fn from_flags(tam: bool, goals: bool, pipeline: bool, all: bool) -> Self {
        if all || !(tam || goals || pipeline) {
            Self::all()
        } else {
            Self {
                tam,
                goals,
                pipeline,
            }
        }
    }
}

/// Reports of the imports that ran.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReport {
    pub tam: Option<TamReport>,
    pub goals: Option<GoalsReport>,
    pub pipeline: Option<PipelineReport>,
}

pub struct Importer<'a, B: Backend + ?Sized> {
    backend: &'a B,
    settings: &'a ImportSettings,
    dry_run: bool,
}

impl<'a, B: Backend + ?Sized> Importer<'a, B> {
    pub fn new(backend: &'a B, settings: &'a ImportSettings, dry_run: bool) -> Self {
        Self {
            backend,
            settings,
            dry_run,
        }
    }

    /// Run the selected imports in order: TAM, goals, pipeline.
    ///
    /// The first failure stops the run.
    pub async fn run(&self, selection: ImportSelection) -> ImportResult<RunReport> {
        let mut report = RunReport::default();

        if selection.tam {
            report.tam = Some(self.import_tam().await?);
        }
        if selection.goals {
            report.goals = Some(self.import_goals().await?);
        }
        if selection.pipeline {
            report.pipeline = Some(self.import_pipeline().await?);
        }

        Ok(report)
    }

    fn announce(&self, what: &str, path: &Path) {
        let prefix = if self.dry_run { "[DRY RUN] " } else { "" };
        log_info(format!("{}Importing {} from {}", prefix, what, path.display()));
    }

    /// "would be " in dry runs, nothing otherwise.
    fn would_be(&self) -> &'static str {
        if self.dry_run {
            "would be "
        } else {
            ""
        }
    }
}

fn read_sheets(path: &Path, sheets: &[(&str, usize)]) -> ImportResult<Vec<Sheet>> {
    let mut workbook = Workbook::open(path)?;
    let mut out = Vec::with_capacity(sheets.len());
    for (name, header_row) in sheets {
        out.push(workbook.read_sheet(name, *header_row)?);
    }
    Ok(out)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Throwaway CSV-directory workbooks for importer tests.

    use std::fs;
    use std::path::Path;

    use crate::config::{ImportSettings, SourceFiles};

    /// Write `<data_dir>/<workbook>/<sheet>.csv`.
    pub fn write_sheet(data_dir: &Path, workbook: &str, sheet: &str, contents: &str) {
        let dir = data_dir.join(workbook);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.csv", sheet)), contents).unwrap();
    }

    pub fn settings(data_dir: &Path) -> ImportSettings {
        ImportSettings {
            sources: SourceFiles::in_dir(data_dir),
            target_year: 2026,
            fallback_quarter_year: 2026,
        }
    }
}
