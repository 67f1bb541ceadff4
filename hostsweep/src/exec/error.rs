// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution error types

use thiserror::Error;

use crate::engine::EngineError;
use crate::session::SessionError;

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
