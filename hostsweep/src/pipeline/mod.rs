// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Bounded-concurrency sweep pipeline
//!
//! Drives the keyset paginator from a single thread, fans pages out to a
//! fixed-size worker pool, and accounts exactly how many hosts were
//! processed. Backpressure keeps at most `concurrency` tasks in flight; the
//! first task failure aborts the sweep after already-dispatched siblings
//! have drained.

pub mod config;
pub mod error;
pub mod orchestrator;
pub(crate) mod worker;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use orchestrator::HostPipeline;
