// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sweep orchestrator
//!
//! `process_all` either returns the exact number of hosts whose task
//! completed successfully, or the first error encountered. It never returns
//! a partial count: a failing task aborts the sweep (fail-fast) because
//! callers depend on the count being exact. Already-dispatched sibling tasks
//! are still drained before the error surfaces so no worker is abandoned
//! mid-call.

use std::sync::Arc;

use crate::exec::QueryExecutor;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::error::PipelineError;
use crate::pipeline::worker::WorkerPool;
use crate::qa::{listing_question, AnswerService, HostAnswer};
use crate::scan::{KeysetPaginator, ScanSpec};
use crate::session::SessionSlot;

/// Sweeps the host key space and asks the answering service about each host
pub struct HostPipeline {
    config: PipelineConfig,
    scan: ScanSpec,
    executor: Arc<QueryExecutor>,
    qa: Arc<dyn AnswerService>,
}

impl HostPipeline {
    pub fn new(executor: Arc<QueryExecutor>, qa: Arc<dyn AnswerService>) -> Self {
        Self {
            config: PipelineConfig::default(),
            scan: ScanSpec::default(),
            executor,
            qa,
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_scan(mut self, scan: ScanSpec) -> Self {
        self.scan = scan;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the sweep to completion.
    ///
    /// Pages are submitted in paginator order; tasks may complete out of
    /// order. In-flight tasks never exceed the configured concurrency: once
    /// the bound is reached the driving loop blocks until any task finishes
    /// before submitting the next page.
    pub fn process_all(&self) -> Result<usize, PipelineError> {
        let concurrency = self.config.concurrency();
        let page_size = self.config.page_size();
        let max_count = self.config.max_count();
        log::info!(
            "Starting host sweep: partition={} page_size={} max_count={:?} concurrency={}",
            self.scan.partition,
            page_size,
            max_count,
            concurrency
        );

        let mut pool = WorkerPool::spawn(concurrency)?;
        let mut slot = SessionSlot::driver();
        let paginator = KeysetPaginator::new(Arc::clone(&self.executor), self.scan.clone());

        let mut in_flight = 0usize;
        let mut total_processed = 0usize;
        let mut first_error: Option<PipelineError> = None;

        let pages = match paginator.pages(&mut slot, page_size, max_count) {
            Ok(pages) => pages,
            Err(e) => {
                pool.join();
                return Err(e.into());
            }
        };

        'submit: for page in pages {
            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    first_error = Some(e.into());
                    break 'submit;
                }
            };

            // Backpressure: block until a task finishes before going over
            // the in-flight bound
            while in_flight >= concurrency {
                match pool.wait_one() {
                    Ok(Ok(processed)) => {
                        total_processed += processed;
                        in_flight -= 1;
                    }
                    Ok(Err(e)) => {
                        first_error = Some(e);
                        in_flight -= 1;
                        break 'submit;
                    }
                    Err(e) => {
                        first_error = Some(e);
                        in_flight = 0;
                        break 'submit;
                    }
                }
            }

            let qa = Arc::clone(&self.qa);
            let submitted = pool.submit(Box::new(move || process_page(qa.as_ref(), &page)));
            if let Err(e) = submitted {
                first_error = Some(e);
                break 'submit;
            }
            in_flight += 1;
        }

        // Drain already-dispatched tasks; their results still count unless
        // an error has already been recorded
        pool.close();
        while in_flight > 0 {
            match pool.wait_one() {
                Ok(Ok(processed)) => total_processed += processed,
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                    break;
                }
            }
            in_flight -= 1;
        }
        pool.join();

        match first_error {
            Some(e) => {
                log::error!("Host sweep aborted: {}", e);
                Err(e)
            }
            None => {
                log::info!("Host sweep complete: {} hosts processed", total_processed);
                Ok(total_processed)
            }
        }
    }
}

/// Process one page of hosts sequentially, asking the answering service
/// about each; the task's result is the number of hosts answered.
fn process_page(qa: &dyn AnswerService, host_ids: &[i64]) -> Result<usize, PipelineError> {
    let mut answers = Vec::with_capacity(host_ids.len());
    for &host_id in host_ids {
        let question = listing_question(host_id);
        let answer = qa.ask(&question)?;
        log::debug!("Answered host {}", host_id);
        answers.push(HostAnswer {
            host_id,
            answer_text: answer.as_text(),
        });
    }
    Ok(answers.len())
}
