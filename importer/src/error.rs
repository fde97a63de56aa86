//! Error types for the import pipeline.
//!
//! - [`ConfigError`] - Missing or malformed environment configuration
//! - [`SheetError`] - Workbook / CSV export reading errors
//! - [`BackendError`] - Supabase (PostgREST) request errors
//! - [`ImportError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing Supabase credentials: {0} is not set. Make sure .env.local is configured.")]
    MissingVar(&'static str),

    /// A variable is set but unusable.
    #[error("Invalid value for {name}: {message}")]
    InvalidVar { name: &'static str, message: String },
}

// =============================================================================
// Sheet Reading Errors
// =============================================================================

/// Errors while reading a workbook or one of its sheets.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to read a file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet library rejected the workbook.
    #[error("Failed to open workbook {path}: {message}")]
    Workbook { path: String, message: String },

    /// The requested sheet does not exist.
    #[error("Sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: String, sheet: String },

    /// The header row lies past the end of the sheet.
    #[error("Sheet '{sheet}' has {rows} rows, header row {header_row} is out of range")]
    HeaderOutOfRange {
        sheet: String,
        header_row: usize,
        rows: usize,
    },

    /// Malformed CSV export.
    #[error("Invalid CSV in {path}: {message}")]
    Csv { path: String, message: String },
}

// =============================================================================
// Backend Errors
// =============================================================================

/// Errors returned by the persistence backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request could not be sent or read.
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("Backend error on '{table}' (HTTP {status}): {message}")]
    Api {
        table: String,
        status: u16,
        message: String,
    },

    /// The response body was not what PostgREST returns.
    #[error("Invalid response from '{table}': {message}")]
    InvalidResponse { table: String, message: String },

    /// An inserted row came back without its id column.
    #[error("Inserted row in '{table}' has no '{column}'")]
    MissingId { table: String, column: String },
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Top-level import errors.
///
/// Returned by every orchestrator in [`crate::import`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sheet reading error.
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Backend error.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Record could not be serialized for the backend.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for sheet reading.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Result type for import runs.
pub type ImportResult<T> = Result<T, ImportError>;
