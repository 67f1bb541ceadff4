// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Pipeline error types

use thiserror::Error;

use crate::qa::QaError;
use crate::scan::ScanError;

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("pagination failed: {0}")]
    Scan(#[from] ScanError),

    #[error("task failed: {0}")]
    Qa(#[from] QaError),

    #[error("worker pool failure: {0}")]
    WorkerPool(String),
}
