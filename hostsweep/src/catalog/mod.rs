// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Table metadata caching

pub mod schema_cache;

pub use schema_cache::{CatalogError, ColumnInfo, SchemaCache, TableSchema};
