// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Process-wide schema metadata cache
//!
//! Caches column names and types per table, populated from a `DESCRIBE`
//! round trip on first access and read without further engine traffic
//! afterwards. Entries are written once and never invalidated: a schema
//! change in the warehouse requires a process restart to be observed. That
//! limitation is accepted; the cache exists to keep metadata lookups off the
//! hot path, not to track live DDL.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::exec::{ExecutionError, QueryExecutor};
use crate::session::SessionSlot;

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("describe failed: {0}")]
    Execution(#[from] ExecutionError),

    #[error("no column metadata returned for table {0}")]
    MissingMetadata(String),
}

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

/// Column metadata for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
}

/// Write-once, read-mostly table schema cache
#[derive(Default)]
pub struct SchemaCache {
    tables: RwLock<HashMap<String, Arc<TableSchema>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached schema for `table`, if already loaded
    pub fn get(&self, table: &str) -> Option<Arc<TableSchema>> {
        self.tables.read().get(table).cloned()
    }

    /// Number of tables cached so far
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }

    /// Cached schema for `table`, describing it through the executor on the
    /// first access.
    pub fn get_or_describe(
        &self,
        executor: &QueryExecutor,
        slot: &mut SessionSlot,
        table: &str,
    ) -> Result<Arc<TableSchema>, CatalogError> {
        if let Some(schema) = self.get(table) {
            return Ok(schema);
        }

        let result = executor
            .execute(slot, &format!("DESCRIBE {table}"))?
            .ok_or_else(|| CatalogError::MissingMetadata(table.to_string()))?;
        if result.is_empty() {
            return Err(CatalogError::MissingMetadata(table.to_string()));
        }

        let columns = result
            .rows
            .iter()
            .filter_map(|row| {
                let name = row.get_value_at_position(0)?.to_string();
                let data_type = row.get_value_at_position(1)?.to_string();
                Some(ColumnInfo { name, data_type })
            })
            .collect();

        let schema = Arc::new(TableSchema {
            table: table.to_string(),
            columns,
        });

        // first description wins; concurrent loaders agree on content anyway
        let mut tables = self.tables.write();
        Ok(tables
            .entry(table.to_string())
            .or_insert_with(|| schema)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ConnectOptions, MemoryEngine, QueryEngine, ScalarValue};
    use crate::session::{PoolConfig, ServiceProvider, SessionPool};

    fn executor_over(engine: &MemoryEngine) -> QueryExecutor {
        let provider = Arc::new(ServiceProvider::new(
            Arc::new(engine.clone()) as Arc<dyn QueryEngine>,
            ConnectOptions::service(),
        ));
        QueryExecutor::new(Arc::new(SessionPool::new(provider, PoolConfig::default())))
    }

    #[test]
    fn test_describe_once_then_cached() {
        let engine = MemoryEngine::new();
        engine.create_table(
            "itx.dim_salesforce_account_update",
            &[("host_id_external", "bigint"), ("ds", "varchar")],
            vec![vec![
                ScalarValue::Bigint(1),
                ScalarValue::Varchar("2026-08-04".to_string()),
            ]],
        );
        let executor = executor_over(&engine);
        let cache = SchemaCache::new();
        let mut slot = SessionSlot::driver();

        assert!(cache.get("itx.dim_salesforce_account_update").is_none());

        let schema = cache
            .get_or_describe(&executor, &mut slot, "itx.dim_salesforce_account_update")
            .unwrap();
        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.columns[0].name, "host_id_external");
        assert_eq!(schema.columns[0].data_type, "bigint");

        // second lookup is served from the cache
        let again = cache
            .get_or_describe(&executor, &mut slot, "itx.dim_salesforce_account_update")
            .unwrap();
        assert!(Arc::ptr_eq(&schema, &again));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unknown_table_errors() {
        let engine = MemoryEngine::new();
        let executor = executor_over(&engine);
        let cache = SchemaCache::new();
        let mut slot = SessionSlot::driver();

        assert!(cache
            .get_or_describe(&executor, &mut slot, "missing.table")
            .is_err());
        assert!(cache.is_empty());
    }
}
