// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scan target description

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default host dimension table
pub const DEFAULT_TABLE: &str = "homes.host__dim_active";
/// Default partition column
pub const DEFAULT_PARTITION_COLUMN: &str = "ds";
/// Default sort metric column
pub const DEFAULT_METRIC_COLUMN: &str = "m_active_listings";
/// Default tiebreak key column
pub const DEFAULT_KEY_COLUMN: &str = "id_host";

/// Return the partition date string (YYYY-MM-DD) for the day before
/// yesterday in UTC; the freshest partition guaranteed to be complete.
pub fn ds_for_query() -> String {
    (Utc::now() - Duration::days(2)).format("%Y-%m-%d").to_string()
}

/// Which table and columns a keyset scan walks
///
/// The scanned partition must stay immutable for the duration of a pipeline
/// run; the cursor order gives exactly-once coverage only on a frozen
/// key space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSpec {
    pub table: String,
    pub partition_column: String,
    /// Partition value, e.g. "2026-08-04"
    pub partition: String,
    /// Column providing the descending sort metric
    pub metric_column: String,
    /// Column providing the ascending tiebreak key
    pub key_column: String,
}

impl ScanSpec {
    /// Scan of the default host dimension at the default partition date
    pub fn host_dimension() -> Self {
        Self::host_dimension_at(ds_for_query())
    }

    /// Scan of the default host dimension at an explicit partition date
    pub fn host_dimension_at(partition: String) -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            partition_column: DEFAULT_PARTITION_COLUMN.to_string(),
            partition,
            metric_column: DEFAULT_METRIC_COLUMN.to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
        }
    }
}

impl Default for ScanSpec {
    fn default() -> Self {
        Self::host_dimension()
    }
}
