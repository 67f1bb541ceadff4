// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory query engine
//!
//! Implements the [`QueryEngine`] contract over process-local tables. It
//! understands exactly the statement family this crate issues - the liveness
//! probe, the keyset page scan, `DESCRIBE`, `CREATE OR REPLACE VIEW` and the
//! `SELECT * ... LIMIT` verification query - which is enough to back the test
//! suite and the CLI demo mode without a warehouse.
//!
//! Views materialize as a single-row marker table; that satisfies the
//! bootstrap verification query without evaluating the view body.
//!
//! Failure injection hooks (`fail_next_connects`, `fail_next_statements`,
//! `invalidate_connections`) let pool and executor tests exercise the
//! retirement paths. Note that the liveness probe is a statement like any
//! other and consumes injected statement failures.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::engine::error::EngineError;
use crate::engine::traits::{EngineConnection, EngineCursor, QueryEngine};
use crate::engine::types::{ConnectOptions, ScalarValue};

static PAGE_SCAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^SELECT (\w+), (\w+) FROM ([\w.]+) WHERE (\w+) = '([^']*)'( AND \(\w+ < (-?\d+) OR \(\w+ = (-?\d+) AND \w+ > (-?\d+)\)\))? ORDER BY \w+ DESC, \w+ ASC LIMIT (\d+)$",
    )
    .expect("page scan pattern")
});

static DESCRIBE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^DESCRIBE ([\w.]+)$").expect("describe pattern"));

static CREATE_VIEW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^CREATE OR REPLACE VIEW ([\w.]+) AS .+$").expect("create view pattern")
});

static SELECT_LIMIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^SELECT \* FROM ([\w.]+) LIMIT (\d+)$").expect("select pattern"));

struct MemoryTable {
    columns: Vec<(String, String)>,
    rows: Vec<Vec<ScalarValue>>,
}

#[derive(Default)]
struct EngineState {
    tables: HashMap<String, MemoryTable>,
    views: HashSet<String>,
    /// Connections born before the current epoch are considered dead
    epoch: u64,
    fail_connects: usize,
    fail_statements: usize,
    connections_created: usize,
}

/// Process-local engine backing tests and the CLI demo mode
#[derive(Clone, Default)]
pub struct MemoryEngine {
    state: Arc<RwLock<EngineState>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with its column metadata and rows
    pub fn create_table(
        &self,
        name: &str,
        columns: &[(&str, &str)],
        rows: Vec<Vec<ScalarValue>>,
    ) {
        let table = MemoryTable {
            columns: columns
                .iter()
                .map(|(n, t)| ((*n).to_string(), (*t).to_string()))
                .collect(),
            rows,
        };
        self.state.write().tables.insert(name.to_string(), table);
    }

    /// Make the next `n` connection attempts fail
    pub fn fail_next_connects(&self, n: usize) {
        self.state.write().fail_connects = n;
    }

    /// Make the next `n` statements fail, regardless of connection
    pub fn fail_next_statements(&self, n: usize) {
        self.state.write().fail_statements = n;
    }

    /// Kill every currently-open connection; new connections are unaffected
    pub fn invalidate_connections(&self) {
        self.state.write().epoch += 1;
    }

    /// Total connections handed out since creation
    pub fn connections_created(&self) -> usize {
        self.state.read().connections_created
    }

    pub fn is_view_registered(&self, name: &str) -> bool {
        self.state.read().views.contains(name)
    }
}

impl QueryEngine for MemoryEngine {
    fn name(&self) -> &str {
        "memory"
    }

    fn connect(&self, _options: &ConnectOptions) -> Result<Box<dyn EngineConnection>, EngineError> {
        let mut state = self.state.write();
        if state.fail_connects > 0 {
            state.fail_connects -= 1;
            return Err(EngineError::Unavailable(
                "injected connect failure".to_string(),
            ));
        }
        state.connections_created += 1;
        let epoch = state.epoch;
        drop(state);

        Ok(Box::new(MemoryConnection {
            state: Arc::clone(&self.state),
            epoch,
            closed: false,
        }))
    }
}

struct MemoryConnection {
    state: Arc<RwLock<EngineState>>,
    epoch: u64,
    closed: bool,
}

impl EngineConnection for MemoryConnection {
    fn open_cursor(&mut self) -> Result<Box<dyn EngineCursor + '_>, EngineError> {
        if self.closed {
            return Err(EngineError::ConnectionLost("connection closed".to_string()));
        }
        Ok(Box::new(MemoryCursor {
            state: Arc::clone(&self.state),
            epoch: self.epoch,
            result: None,
            closed: false,
        }))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

struct MemoryCursor {
    state: Arc<RwLock<EngineState>>,
    epoch: u64,
    /// `Some((columns, rows))` after a statement with a result set,
    /// `Some` with empty columns never occurs; `None` after DDL
    result: Option<(Vec<String>, Vec<Vec<ScalarValue>>)>,
    closed: bool,
}

impl EngineCursor for MemoryCursor {
    fn execute(&mut self, sql: &str) -> Result<(), EngineError> {
        if self.closed {
            return Err(EngineError::CursorClosed);
        }

        let mut state = self.state.write();
        if state.fail_statements > 0 {
            state.fail_statements -= 1;
            return Err(EngineError::Statement(
                "injected statement failure".to_string(),
            ));
        }
        if self.epoch < state.epoch {
            return Err(EngineError::ConnectionLost(
                "connection invalidated".to_string(),
            ));
        }

        let normalized = sql.split_whitespace().collect::<Vec<_>>().join(" ");
        self.result = dispatch(&mut state, &normalized)?;
        Ok(())
    }

    fn description(&self) -> Option<&[String]> {
        self.result.as_ref().map(|(columns, _)| columns.as_slice())
    }

    fn fetch_all(&mut self) -> Result<Vec<Vec<ScalarValue>>, EngineError> {
        if self.closed {
            return Err(EngineError::CursorClosed);
        }
        match self.result.as_mut() {
            Some((_, rows)) => Ok(std::mem::take(rows)),
            None => Ok(Vec::new()),
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.result = None;
    }
}

type StatementResult = Option<(Vec<String>, Vec<Vec<ScalarValue>>)>;

fn dispatch(state: &mut EngineState, sql: &str) -> Result<StatementResult, EngineError> {
    if sql == "SELECT 1" {
        return Ok(Some((
            vec!["_col0".to_string()],
            vec![vec![ScalarValue::Bigint(1)]],
        )));
    }

    if let Some(caps) = PAGE_SCAN_RE.captures(sql) {
        return page_scan(state, &caps).map(Some);
    }

    if let Some(caps) = DESCRIBE_RE.captures(sql) {
        let table = lookup(state, &caps[1])?;
        let rows = table
            .columns
            .iter()
            .map(|(name, ty)| {
                vec![
                    ScalarValue::Varchar(name.clone()),
                    ScalarValue::Varchar(ty.clone()),
                ]
            })
            .collect();
        return Ok(Some((
            vec!["Column".to_string(), "Type".to_string()],
            rows,
        )));
    }

    if let Some(caps) = CREATE_VIEW_RE.captures(sql) {
        let name = caps[1].to_string();
        state.tables.insert(
            name.clone(),
            MemoryTable {
                columns: vec![("ok".to_string(), "bigint".to_string())],
                rows: vec![vec![ScalarValue::Bigint(1)]],
            },
        );
        state.views.insert(name);
        return Ok(None);
    }

    if let Some(caps) = SELECT_LIMIT_RE.captures(sql) {
        let limit: usize = caps[2].parse().unwrap_or(0);
        let table = lookup(state, &caps[1])?;
        let columns = table.columns.iter().map(|(n, _)| n.clone()).collect();
        let rows = table.rows.iter().take(limit).cloned().collect();
        return Ok(Some((columns, rows)));
    }

    Err(EngineError::Statement(format!(
        "unsupported statement: {}",
        sql
    )))
}

fn lookup<'a>(state: &'a EngineState, name: &str) -> Result<&'a MemoryTable, EngineError> {
    state
        .tables
        .get(name)
        .ok_or_else(|| EngineError::UnknownTable(name.to_string()))
}

fn page_scan(
    state: &EngineState,
    caps: &regex::Captures<'_>,
) -> Result<(Vec<String>, Vec<Vec<ScalarValue>>), EngineError> {
    let key_col = &caps[1];
    let metric_col = &caps[2];
    let table = lookup(state, &caps[3])?;
    let part_col = &caps[4];
    let partition = &caps[5];
    let cursor = match (caps.get(7), caps.get(9)) {
        (Some(lt), Some(gt)) => Some((
            lt.as_str()
                .parse::<i64>()
                .map_err(|e| EngineError::Statement(e.to_string()))?,
            gt.as_str()
                .parse::<i64>()
                .map_err(|e| EngineError::Statement(e.to_string()))?,
        )),
        _ => None,
    };
    let limit: usize = caps[10]
        .parse()
        .map_err(|e: std::num::ParseIntError| EngineError::Statement(e.to_string()))?;

    let key_idx = column_index(table, key_col)?;
    let metric_idx = column_index(table, metric_col)?;
    let part_idx = column_index(table, part_col)?;

    let mut selected: Vec<(i64, i64)> = table
        .rows
        .iter()
        .filter_map(|row| {
            let in_partition = matches!(
                row.get(part_idx),
                Some(ScalarValue::Varchar(ds)) if ds == partition
            );
            if !in_partition {
                return None;
            }
            let key = row.get(key_idx)?.as_i64()?;
            let metric = row.get(metric_idx)?.as_i64()?;
            Some((key, metric))
        })
        .filter(|(key, metric)| match cursor {
            Some((last_metric, last_key)) => {
                *metric < last_metric || (*metric == last_metric && *key > last_key)
            }
            None => true,
        })
        .collect();

    selected.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    selected.truncate(limit);

    let rows = selected
        .into_iter()
        .map(|(key, metric)| vec![ScalarValue::Bigint(key), ScalarValue::Bigint(metric)])
        .collect();
    Ok((vec![key_col.to_string(), metric_col.to_string()], rows))
}

fn column_index(table: &MemoryTable, name: &str) -> Result<usize, EngineError> {
    table
        .columns
        .iter()
        .position(|(n, _)| n == name)
        .ok_or_else(|| EngineError::Statement(format!("unknown column: {}", name)))
}
