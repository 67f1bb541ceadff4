// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query execution results

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::ScalarValue;

/// Query execution result
///
/// `columns` preserves the engine's original column order; rows carry both
/// named and positional access to their values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Single result row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    /// Named column bindings (e.g., "id_host" -> 42)
    pub values: HashMap<String, ScalarValue>,
    /// Positional values, ordered as the engine returned them
    pub positional_values: Vec<ScalarValue>,
}

impl Row {
    /// Create a row from positional values with their column names
    pub fn from_positional(values: Vec<ScalarValue>, columns: &[String]) -> Self {
        let named_values = columns
            .iter()
            .zip(values.iter())
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect();

        Self {
            values: named_values,
            positional_values: values,
        }
    }

    /// Get a value by column name
    pub fn get_value(&self, column: &str) -> Option<&ScalarValue> {
        self.values.get(column)
    }

    /// Get a value by position
    pub fn get_value_at_position(&self, position: usize) -> Option<&ScalarValue> {
        self.positional_values.get(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_named_and_positional_access() {
        let columns = vec!["id_host".to_string(), "m_active_listings".to_string()];
        let row = Row::from_positional(
            vec![ScalarValue::Bigint(42), ScalarValue::Bigint(7)],
            &columns,
        );

        assert_eq!(row.get_value("id_host"), Some(&ScalarValue::Bigint(42)));
        assert_eq!(
            row.get_value_at_position(1),
            Some(&ScalarValue::Bigint(7))
        );
        assert_eq!(row.get_value("missing"), None);
    }
}
