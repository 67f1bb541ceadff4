// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Keyset paginator
//!
//! Pages through the scan target with composite-key cursors instead of row
//! offsets: each page is fetched strictly "after" the last row of the
//! previous page under `(metric DESC, key ASC)`, so no row is skipped or
//! repeated while the partition stays immutable. Each page is one round trip;
//! nothing is prefetched.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::exec::{ExecutionError, QueryExecutor};
use crate::scan::spec::ScanSpec;
use crate::session::SessionSlot;

/// Pagination errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("page fetch failed: {0}")]
    Execution(#[from] ExecutionError),

    #[error("malformed page row: {0}")]
    MalformedRow(String),
}

/// Composite cursor marking the last row of the previous page
///
/// Orders the key space by `sort_metric` descending, `tiebreak_id` ascending
/// on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub sort_metric: i64,
    pub tiebreak_id: i64,
}

/// Fetches pages of host keys with keyset pagination
pub struct KeysetPaginator {
    executor: Arc<QueryExecutor>,
    spec: ScanSpec,
}

impl KeysetPaginator {
    pub fn new(executor: Arc<QueryExecutor>, spec: ScanSpec) -> Self {
        Self { executor, spec }
    }

    pub fn spec(&self) -> &ScanSpec {
        &self.spec
    }

    /// Fetch one page after `cursor`.
    ///
    /// # Returns
    /// `(keys, new_cursor)`; `new_cursor` is derived from the last returned
    /// row and is `None` together with an empty page at the end of data.
    pub fn fetch_page(
        &self,
        slot: &mut SessionSlot,
        page_size: usize,
        cursor: Option<PageCursor>,
    ) -> Result<(Vec<i64>, Option<PageCursor>), ScanError> {
        if page_size == 0 {
            return Err(ScanError::InvalidPageSize);
        }

        let sql = self.page_sql(page_size, cursor.as_ref());
        log::debug!("Fetching host page: {}", sql);

        let result = self.executor.execute(slot, &sql)?.unwrap_or_default();

        let mut keys = Vec::with_capacity(result.row_count());
        let mut new_cursor = None;
        for row in &result.rows {
            let key = row
                .get_value(&self.spec.key_column)
                .and_then(|v| v.as_i64())
                .ok_or_else(|| {
                    ScanError::MalformedRow(format!("missing {}", self.spec.key_column))
                })?;
            let metric = row
                .get_value(&self.spec.metric_column)
                .and_then(|v| v.as_i64())
                .ok_or_else(|| {
                    ScanError::MalformedRow(format!("missing {}", self.spec.metric_column))
                })?;
            keys.push(key);
            new_cursor = Some(PageCursor {
                sort_metric: metric,
                tiebreak_id: key,
            });
        }

        Ok((keys, new_cursor))
    }

    /// Lazy sequence of key pages, at most `max_count` keys in total.
    ///
    /// The sequence is finite, forward-only and not restartable. It stops on
    /// an empty page, on a page shorter than `page_size` (end of data, saves
    /// one round trip), or once `max_count` keys have been emitted, whichever
    /// comes first; the final page is truncated to fit `max_count`.
    pub fn pages<'a>(
        &'a self,
        slot: &'a mut SessionSlot,
        page_size: usize,
        max_count: Option<usize>,
    ) -> Result<Pages<'a>, ScanError> {
        if page_size == 0 {
            return Err(ScanError::InvalidPageSize);
        }

        Ok(Pages {
            paginator: self,
            slot,
            page_size,
            max_count,
            cursor: None,
            total_emitted: 0,
            done: false,
        })
    }

    fn page_sql(&self, page_size: usize, cursor: Option<&PageCursor>) -> String {
        let ScanSpec {
            table,
            partition_column,
            partition,
            metric_column,
            key_column,
        } = &self.spec;

        let mut sql = format!(
            "SELECT {key_column}, {metric_column} FROM {table} \
             WHERE {partition_column} = '{partition}'"
        );
        if let Some(cursor) = cursor {
            sql.push_str(&format!(
                " AND ({metric_column} < {last_metric} \
                 OR ({metric_column} = {last_metric} AND {key_column} > {last_id}))",
                last_metric = cursor.sort_metric,
                last_id = cursor.tiebreak_id,
            ));
        }
        sql.push_str(&format!(
            " ORDER BY {metric_column} DESC, {key_column} ASC LIMIT {page_size}"
        ));
        sql
    }
}

/// Iterator produced by [`KeysetPaginator::pages`]
pub struct Pages<'a> {
    paginator: &'a KeysetPaginator,
    slot: &'a mut SessionSlot,
    page_size: usize,
    max_count: Option<usize>,
    cursor: Option<PageCursor>,
    total_emitted: usize,
    done: bool,
}

impl Pages<'_> {
    /// Keys emitted so far
    pub fn total_emitted(&self) -> usize {
        self.total_emitted
    }
}

impl Iterator for Pages<'_> {
    type Item = Result<Vec<i64>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(max) = self.max_count {
            if self.total_emitted >= max {
                self.done = true;
                return None;
            }
        }

        let fetched = match self.paginator.fetch_page(self.slot, self.page_size, self.cursor) {
            Ok(page) => page,
            Err(e) => {
                // a pagination fault aborts the sequence
                self.done = true;
                return Some(Err(e));
            }
        };

        let (mut keys, cursor) = fetched;
        if keys.is_empty() {
            self.done = true;
            return None;
        }

        let full_len = keys.len();
        if let Some(max) = self.max_count {
            let remaining = max - self.total_emitted;
            if keys.len() > remaining {
                keys.truncate(remaining);
            }
        }
        self.total_emitted += keys.len();
        self.cursor = cursor;

        // a short page marks the logical end regardless of max_count
        if full_len < self.page_size {
            self.done = true;
        }
        if let Some(max) = self.max_count {
            if self.total_emitted >= max {
                self.done = true;
            }
        }

        Some(Ok(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::spec::ScanSpec;
    use crate::session::{PoolConfig, ServiceProvider, SessionPool};
    use std::sync::Arc;

    fn paginator() -> KeysetPaginator {
        let engine = crate::engine::MemoryEngine::new();
        let provider = Arc::new(ServiceProvider::new(
            Arc::new(engine) as Arc<dyn crate::engine::QueryEngine>,
            crate::engine::ConnectOptions::service(),
        ));
        let executor = Arc::new(QueryExecutor::new(Arc::new(SessionPool::new(
            provider,
            PoolConfig::default(),
        ))));
        KeysetPaginator::new(executor, ScanSpec::host_dimension_at("2026-08-04".to_string()))
    }

    #[test]
    fn test_page_sql_without_cursor() {
        let sql = paginator().page_sql(10, None);
        assert_eq!(
            sql,
            "SELECT id_host, m_active_listings FROM homes.host__dim_active \
             WHERE ds = '2026-08-04' \
             ORDER BY m_active_listings DESC, id_host ASC LIMIT 10"
        );
    }

    #[test]
    fn test_page_sql_with_cursor() {
        let cursor = PageCursor {
            sort_metric: 5,
            tiebreak_id: 12,
        };
        let sql = paginator().page_sql(2, Some(&cursor));
        assert!(sql.contains(
            "AND (m_active_listings < 5 OR (m_active_listings = 5 AND id_host > 12))"
        ));
        assert!(sql.ends_with("ORDER BY m_active_listings DESC, id_host ASC LIMIT 2"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let paginator = paginator();
        let mut slot = SessionSlot::driver();
        assert!(matches!(
            paginator.fetch_page(&mut slot, 0, None),
            Err(ScanError::InvalidPageSize)
        ));
        assert!(matches!(
            paginator.pages(&mut slot, 0, None).err(),
            Some(ScanError::InvalidPageSize)
        ));
    }
}
