//! # Scout Import - spreadsheet to Supabase importer
//!
//! Loads the sales team's planning workbooks (TAM accounts, company goals
//! and sales KPIs, pipeline deals) into the CRM tables of a Supabase
//! project.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Workbook   │────▶│   Parser    │────▶│  Extract +  │────▶│   Backend   │
//! │ (xlsx/csv)  │     │  (sheets)   │     │   Mapping   │     │ (PostgREST) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scout_import::{Config, ImportSelection, ImportSettings, Importer, SupabaseClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().unwrap();
//!     let backend = SupabaseClient::new(&config.credentials);
//!     let settings = ImportSettings::default();
//!
//!     let report = Importer::new(&backend, &settings, true)
//!         .run(ImportSelection::all())
//!         .await
//!         .unwrap();
//!     println!("{:?}", report.pipeline.map(|p| p.summary));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Credentials, workbook paths, years
//! - [`logs`] - Progress logging
//! - [`models`] - Table rows and their vocabularies
//! - [`parser`] - Workbook and CSV-export reading
//! - [`mapping`] - Value normalization rules
//! - [`extract`] - Row to record extraction
//! - [`backend`] - Supabase client and in-memory store
//! - [`import`] - Import orchestration

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Reading and normalization
pub mod extract;
pub mod mapping;
pub mod parser;

// Persistence and orchestration
pub mod backend;
pub mod import;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    BackendError, BackendResult, ConfigError, ConfigResult, ImportError, ImportResult,
    SheetError, SheetResult,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{Config, Credentials, ImportSettings, SourceFiles};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AccountPlan, FitTier, Goal, GoalCategory, GoalType, Pursuit, PursuitType, Region, Stage,
    Table, TamAccount, Vertical,
};

// =============================================================================
// Re-exports - Mapping
// =============================================================================

pub use mapping::{
    clean_employees, clean_revenue, map_deal_stage, map_deal_type_to_pursuit_type,
    map_priority_to_tier, map_stage_to_probability, parse_quarter_to_date,
};

// =============================================================================
// Re-exports - Backend and import
// =============================================================================

pub use backend::{Backend, MemoryBackend, SupabaseClient};
pub use extract::extract_company_from_deal;
pub use import::{
    AccountPlanCache, GoalsReport, ImportSelection, Importer, PipelineReport, RunReport,
    StageSummary, TamReport,
};
