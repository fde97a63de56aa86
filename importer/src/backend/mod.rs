//! Persistence backends.
//!
//! Importers only talk to the [`Backend`] trait. The CLI wires in
//! [`SupabaseClient`]; tests use [`MemoryBackend`].

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::{BackendError, BackendResult};
use crate::models::Table;

pub use memory::MemoryBackend;
pub use supabase::SupabaseClient;

/// Row store the importers write to.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Insert rows and return them as stored, id column included.
    async fn insert(&self, table: Table, rows: Vec<Value>) -> BackendResult<Vec<Value>>;

    /// Read `columns` of every row in `table`.
    async fn select(&self, table: Table, columns: &[&str]) -> BackendResult<Vec<Value>>;
}

/// Serialize records into backend rows.
pub fn to_rows<T: Serialize>(records: &[T]) -> serde_json::Result<Vec<Value>> {
    records.iter().map(serde_json::to_value).collect()
}

/// Id of a stored row, read from the table's id column.
///
/// Numeric ids are stringified.
pub fn returned_id(table: Table, row: &Value) -> BackendResult<String> {
    let missing = || BackendError::MissingId {
        table: table.to_string(),
        column: table.id_column().to_string(),
    };

    match row.get(table.id_column()).ok_or_else(missing)? {
        Value::String(id) => Ok(id.clone()),
        Value::Number(id) => Ok(id.to_string()),
        _ => Err(missing()),
    }
}

/// Insert a single row and return its id.
pub async fn insert_one<B: Backend + ?Sized>(
    backend: &B,
    table: Table,
    row: Value,
) -> BackendResult<String> {
    let stored = backend.insert(table, vec![row]).await?;
    let first = stored.first().ok_or_else(|| BackendError::InvalidResponse {
        table: table.to_string(),
        message: "insert returned no rows".to_string(),
    })?;
    returned_id(table, first)
}
