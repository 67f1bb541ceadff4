// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine trait definitions
//!
//! The contract is deliberately small: connect, open a cursor, execute a
//! statement, read the column description, fetch the rows, close. Statements
//! that produce no result set (DDL) report a `None` description.

use crate::engine::error::EngineError;
use crate::engine::types::{ConnectOptions, ScalarValue};

/// A remote query engine that can hand out connections.
///
/// Implementations are shared across workers via `Arc`; the connections they
/// produce are not.
pub trait QueryEngine: Send + Sync {
    /// Human-readable engine name for logs
    fn name(&self) -> &str;

    /// Establish a new connection.
    ///
    /// A failure here is a transient connection fault; callers retire and
    /// recreate, they do not retry in place.
    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn EngineConnection>, EngineError>;
}

/// One established, stateful connection.
///
/// Connections are owned by exactly one worker at a time and are never safe
/// to share; `Send` lets ownership move into a worker thread, nothing more.
pub trait EngineConnection: Send {
    /// Open a server-side cursor on this connection
    fn open_cursor(&mut self) -> Result<Box<dyn EngineCursor + '_>, EngineError>;

    /// Close the connection, releasing remote resources. Idempotent.
    fn close(&mut self);
}

/// A server-side cursor scoped to one statement.
pub trait EngineCursor {
    /// Run a statement on this cursor
    fn execute(&mut self, sql: &str) -> Result<(), EngineError>;

    /// Column names of the current result set, in result order.
    /// `None` when the statement produced no result set.
    fn description(&self) -> Option<&[String]>;

    /// Materialize all remaining rows of the current result set
    fn fetch_all(&mut self) -> Result<Vec<Vec<ScalarValue>>, EngineError>;

    /// Release the cursor on the server. Idempotent.
    fn close(&mut self);
}
