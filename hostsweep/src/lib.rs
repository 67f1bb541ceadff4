// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Hostsweep - Keyset-paginated host sweep pipeline over a warehouse QA service
//!
//! Hostsweep walks the host dimension of a columnar analytic store in pages,
//! using cursor-based (keyset) pagination, and dispatches each page to a
//! bounded pool of workers that ask a natural-language answering service
//! about every host.
//!
//! # Guarantees
//!
//! - **Exactly-once coverage**: composite-key cursors give each host to
//!   exactly one page, with no row offsets involved
//! - **Bounded concurrency**: never more than `concurrency` tasks in flight
//! - **Thread-affine sessions**: engine sessions live in per-worker slots,
//!   retired by age, use count and liveness, never shared
//! - **Exact accounting**: `process_all` returns the precise number of hosts
//!   processed, or the first error - never a partial count
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hostsweep::engine::MemoryEngine;
//! use hostsweep::{ConnectionContext, PipelineConfig, RuntimeEnv, ScanSpec};
//!
//! let engine = Arc::new(MemoryEngine::new());
//! let context = ConnectionContext::new(RuntimeEnv::Service, engine);
//! # let qa: Arc<dyn hostsweep::qa::AnswerService> = unimplemented!();
//! let pipeline = context.pipeline(qa, ScanSpec::host_dimension(), PipelineConfig::default());
//! let processed = pipeline.process_all()?;
//! # Ok::<(), hostsweep::pipeline::PipelineError>(())
//! ```

pub mod catalog;
pub mod context;
pub mod engine;
pub mod exec;
pub mod pipeline;
pub mod qa;
pub mod scan;
pub mod session;
pub mod views;

// Re-export the primary API surface
pub use catalog::SchemaCache;
pub use context::ConnectionContext;
pub use engine::{QueryEngine, ScalarValue};
pub use exec::{QueryExecutor, QueryResult, Row};
pub use pipeline::{HostPipeline, PipelineConfig, PipelineError};
pub use qa::{Answer, AnswerService, HostAnswer};
pub use scan::{KeysetPaginator, PageCursor, ScanSpec};
pub use session::{PoolConfig, RuntimeEnv, SessionPool, SessionSlot};
pub use views::ViewInitializer;

/// Hostsweep version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hostsweep crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
