// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query executor
//!
//! Runs a statement on the caller's acquired session and materializes the
//! result set into ordered column-name-to-value rows. The server-side cursor
//! is released on both success and failure paths; a session that failed
//! mid-statement is invalidated before the error surfaces.

use std::sync::Arc;
use std::time::Instant;

use crate::engine::{EngineCursor, EngineError};
use crate::exec::error::ExecutionError;
use crate::exec::result::{QueryResult, Row};
use crate::session::{Session, SessionPool, SessionSlot};

/// Closes the server-side cursor when the scope ends, error or not
struct CursorGuard<'a> {
    inner: Box<dyn EngineCursor + 'a>,
}

impl<'a> CursorGuard<'a> {
    fn new(inner: Box<dyn EngineCursor + 'a>) -> Self {
        Self { inner }
    }

    fn execute(&mut self, sql: &str) -> Result<(), EngineError> {
        self.inner.execute(sql)
    }

    fn description(&self) -> Option<&[String]> {
        self.inner.description()
    }

    fn fetch_all(&mut self) -> Result<Vec<Vec<crate::engine::ScalarValue>>, EngineError> {
        self.inner.fetch_all()
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.inner.close();
    }
}

/// Executes SQL statements through pooled sessions
pub struct QueryExecutor {
    pool: Arc<SessionPool>,
}

impl QueryExecutor {
    pub fn new(pool: Arc<SessionPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<SessionPool> {
        &self.pool
    }

    /// Execute `sql` on the slot's session.
    ///
    /// # Returns
    /// * `Ok(Some(result))` - the statement produced a result set
    /// * `Ok(None)` - the statement produced no result set (DDL)
    /// * `Err(e)` - the statement failed; the session has been invalidated
    pub fn execute(
        &self,
        slot: &mut SessionSlot,
        sql: &str,
    ) -> Result<Option<QueryResult>, ExecutionError> {
        let outcome = {
            let session = self.pool.acquire(slot)?;
            run_statement(session, sql)
        };

        match outcome {
            Ok(result) => Ok(result),
            Err(e) => {
                log::error!("Statement failed on {}: {} ({})", slot.owner(), e, sql);
                self.pool.invalidate(slot);
                Err(e.into())
            }
        }
    }
}

fn run_statement(session: &mut Session, sql: &str) -> Result<Option<QueryResult>, EngineError> {
    let started = Instant::now();
    let mut cursor = CursorGuard::new(session.conn.open_cursor()?);
    cursor.execute(sql)?;

    let columns = match cursor.description() {
        Some(columns) => columns.to_vec(),
        None => return Ok(None),
    };

    let rows = cursor
        .fetch_all()?
        .into_iter()
        .map(|values| Row::from_positional(values, &columns))
        .collect();

    Ok(Some(QueryResult {
        columns,
        rows,
        execution_time_ms: started.elapsed().as_millis() as u64,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ConnectOptions, MemoryEngine, QueryEngine, ScalarValue};
    use crate::session::{PoolConfig, ServiceProvider};

    fn executor_over(engine: &MemoryEngine) -> QueryExecutor {
        let provider = Arc::new(ServiceProvider::new(
            Arc::new(engine.clone()) as Arc<dyn QueryEngine>,
            ConnectOptions::service(),
        ));
        QueryExecutor::new(Arc::new(SessionPool::new(provider, PoolConfig::default())))
    }

    #[test]
    fn test_execute_materializes_rows_in_column_order() {
        let engine = MemoryEngine::new();
        engine.create_table(
            "t",
            &[("a", "bigint"), ("b", "varchar")],
            vec![vec![
                ScalarValue::Bigint(1),
                ScalarValue::Varchar("x".to_string()),
            ]],
        );
        let executor = executor_over(&engine);
        let mut slot = SessionSlot::driver();

        let result = executor
            .execute(&mut slot, "SELECT * FROM t LIMIT 5")
            .unwrap()
            .unwrap();
        assert_eq!(result.columns, vec!["a", "b"]);
        assert_eq!(
            result.rows[0].get_value("b"),
            Some(&ScalarValue::Varchar("x".to_string()))
        );
    }

    #[test]
    fn test_ddl_returns_none() {
        let engine = MemoryEngine::new();
        let executor = executor_over(&engine);
        let mut slot = SessionSlot::driver();

        let result = executor
            .execute(&mut slot, "CREATE OR REPLACE VIEW v AS SELECT 1")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_failure_invalidates_session() {
        let engine = MemoryEngine::new();
        let executor = executor_over(&engine);
        let mut slot = SessionSlot::driver();

        // warm the slot, then fail a statement mid-use
        executor.execute(&mut slot, "SELECT 1").unwrap();
        assert!(slot.is_populated());

        let err = executor.execute(&mut slot, "SELECT * FROM missing LIMIT 1");
        assert!(err.is_err());
        assert!(!slot.is_populated());

        // the next call transparently builds a fresh session
        executor.execute(&mut slot, "SELECT 1").unwrap();
        assert_eq!(engine.connections_created(), 2);
    }
}
