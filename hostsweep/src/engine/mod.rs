// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Remote query-engine abstraction
//!
//! The pipeline talks to the analytic store through a minimal relational
//! contract: SQL text in, named-column rows out. Anything that supports
//! `WHERE`, multi-key `ORDER BY` and `LIMIT` can sit behind these traits.
//!
//! Two kinds of implementations exist:
//!
//! - Production embedders wire in their own client for the warehouse gateway
//! - [`MemoryEngine`] backs tests and the CLI demo mode

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::EngineError;
pub use memory::MemoryEngine;
pub use traits::{EngineConnection, EngineCursor, QueryEngine};
pub use types::{ConnectOptions, CredentialMode, ScalarValue};
