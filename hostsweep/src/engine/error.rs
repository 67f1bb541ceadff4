// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine error types

use thiserror::Error;

/// Errors surfaced by the remote query engine boundary
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    #[error("connection lost: {0}")]
    ConnectionLost(String),

    #[error("statement failed: {0}")]
    Statement(String),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("cursor already closed")]
    CursorClosed,
}
