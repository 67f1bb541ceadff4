// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Fixed-size worker pool
//!
//! Workers pull jobs from a shared channel and report outcomes on a shared
//! result channel; receiving one result is the orchestrator's wait-for-any.
//! There is no cancellation: a dispatched job always runs to completion, the
//! only early-stop control the orchestrator has is to stop submitting.

use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::pipeline::error::PipelineError;

/// One unit of work dispatched to the pool
pub(crate) type Job = Box<dyn FnOnce() -> Result<usize, PipelineError> + Send + 'static>;

/// Outcome of one job, as delivered by `wait_one`
pub(crate) type JobOutcome = Result<usize, PipelineError>;

pub(crate) struct WorkerPool {
    job_tx: Option<mpsc::Sender<Job>>,
    result_rx: mpsc::Receiver<JobOutcome>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers. `size` must be at least 1; the config layer
    /// guarantees that.
    pub(crate) fn spawn(size: usize) -> Result<Self, PipelineError> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, result_rx) = mpsc::channel::<JobOutcome>();

        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("hostsweep-worker-{}", index))
                .spawn(move || worker_loop(index, &job_rx, &result_tx))
                .map_err(|e| {
                    PipelineError::WorkerPool(format!("failed to spawn worker {}: {}", index, e))
                })?;
            workers.push(handle);
        }

        Ok(Self {
            job_tx: Some(job_tx),
            result_rx,
            workers,
        })
    }

    /// Hand a job to the pool; any idle worker picks it up
    pub(crate) fn submit(&self, job: Job) -> Result<(), PipelineError> {
        match &self.job_tx {
            Some(tx) => tx
                .send(job)
                .map_err(|_| PipelineError::WorkerPool("job channel closed".to_string())),
            None => Err(PipelineError::WorkerPool(
                "pool already closed".to_string(),
            )),
        }
    }

    /// Block until any in-flight job completes and return its outcome.
    ///
    /// Only call with at least one job in flight; otherwise this blocks
    /// until the pool shuts down and reports a pool failure.
    pub(crate) fn wait_one(&self) -> Result<JobOutcome, PipelineError> {
        self.result_rx
            .recv()
            .map_err(|_| PipelineError::WorkerPool("result channel closed".to_string()))
    }

    /// Stop accepting jobs; idle workers exit once the queue drains
    pub(crate) fn close(&mut self) {
        self.job_tx.take();
    }

    /// Close and wait for every worker to exit
    pub(crate) fn join(mut self) {
        self.close();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("A sweep worker panicked during shutdown");
            }
        }
    }
}

fn worker_loop(
    index: usize,
    job_rx: &Mutex<mpsc::Receiver<Job>>,
    result_tx: &mpsc::Sender<JobOutcome>,
) {
    log::debug!("Sweep worker {} started", index);
    loop {
        // hold the lock only while receiving; jobs run unlocked
        let job = {
            let rx = job_rx.lock();
            rx.recv()
        };
        match job {
            Ok(job) => {
                let outcome = job();
                if result_tx.send(outcome).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    log::debug!("Sweep worker {} exiting", index);
}
