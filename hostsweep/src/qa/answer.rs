// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Answer types
//!
//! The answering service sometimes replies with free text and sometimes with
//! a tabular result, depending on how it resolved the question. The variants
//! are tagged rather than duck-typed so callers branch explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::ScalarValue;
use crate::exec::QueryResult;

/// One answer from the answering service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Answer {
    /// A direct natural-language answer
    Text(String),
    /// A tabular result the service chose to return verbatim
    Table(QueryResult),
}

impl Answer {
    /// The answer rendered as display text
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => write!(f, "{}", text),
            Answer::Table(result) => write!(f, "{}", table_to_json(result)),
        }
    }
}

/// Render a tabular answer as a JSON array of column-to-value objects
fn table_to_json(result: &QueryResult) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = result
        .rows
        .iter()
        .map(|row| {
            let mut object = serde_json::Map::new();
            for column in &result.columns {
                let value = row
                    .get_value(column)
                    .map(scalar_to_json)
                    .unwrap_or(serde_json::Value::Null);
                object.insert(column.clone(), value);
            }
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(rows)
}

/// Convert a scalar to a JSON value
fn scalar_to_json(value: &ScalarValue) -> serde_json::Value {
    match value {
        ScalarValue::Null => serde_json::Value::Null,
        ScalarValue::Bigint(v) => serde_json::json!(v),
        ScalarValue::Double(v) => serde_json::json!(v),
        ScalarValue::Boolean(b) => serde_json::Value::Bool(*b),
        ScalarValue::Varchar(s) => serde_json::Value::String(s.clone()),
    }
}

/// Per-host answer collected by a pipeline task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostAnswer {
    pub host_id: i64,
    pub answer_text: String,
}
