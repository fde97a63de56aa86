//! In-memory backend.
//!
//! Stores rows per table and assigns a fresh uuid to the id column on every
//! insert, the way the database does. Inserting the same row twice stores it
//! twice.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::Backend;
use crate::error::{BackendError, BackendResult};
use crate::models::Table;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row stored in `table`.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.tables
            .lock()
            .map(|tables| tables.get(&table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn count(&self, table: Table) -> usize {
        self.rows(table).len()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn insert(&self, table: Table, rows: Vec<Value>) -> BackendResult<Vec<Value>> {
        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut fields) = row else {
                return Err(BackendError::Api {
                    table: table.to_string(),
                    status: 400,
                    message: "row is not a JSON object".to_string(),
                });
            };
            fields.insert(
                table.id_column().to_string(),
                Value::String(Uuid::new_v4().to_string()),
            );
            stored.push(Value::Object(fields));
        }

        let mut tables = self
            .tables
            .lock()
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        tables.entry(table).or_default().extend(stored.iter().cloned());

        Ok(stored)
    }

    async fn select(&self, table: Table, columns: &[&str]) -> BackendResult<Vec<Value>> {
        let rows = self.rows(table);
        Ok(rows
            .into_iter()
            .map(|row| {
                let projected = columns
                    .iter()
                    .filter_map(|c| row.get(*c).map(|v| (c.to_string(), v.clone())))
                    .collect();
                Value::Object(projected)
            })
            .collect())
    }
}
