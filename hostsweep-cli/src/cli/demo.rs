// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Demo data and a canned answering service
//!
//! The demo keeps the whole sweep self-contained: a seeded in-memory host
//! dimension and an answering service that derives plausible answers from
//! the seeded metrics while recording a transcript for display.

use std::sync::Mutex;

use hostsweep::engine::{MemoryEngine, ScalarValue};
use hostsweep::qa::{Answer, AnswerService, QaError, TrainingItem};
use hostsweep::HostAnswer;

/// Partition date the demo tables are seeded at
pub fn demo_partition() -> String {
    hostsweep::scan::spec::ds_for_query()
}

/// Seed `count` demo hosts into the host dimension
pub fn seed_hosts(engine: &MemoryEngine, count: usize) {
    let partition = demo_partition();
    let rows = (0..count)
        .map(|i| {
            let id = 1_000_000 + i as i64;
            // spread of listing counts with repeats so tiebreaks happen
            let metric = 1 + ((i as i64 * 7) % 40);
            vec![
                ScalarValue::Bigint(id),
                ScalarValue::Bigint(metric),
                ScalarValue::Varchar(partition.clone()),
            ]
        })
        .collect();
    engine.create_table(
        "homes.host__dim_active",
        &[
            ("id_host", "bigint"),
            ("m_active_listings", "bigint"),
            ("ds", "varchar"),
        ],
        rows,
    );
}

/// Canned answering service that records its transcript
#[derive(Default)]
pub struct DemoQa {
    transcript: Mutex<Vec<HostAnswer>>,
}

impl DemoQa {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers given so far, in answer order
    pub fn transcript(&self) -> Vec<HostAnswer> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    fn host_id_of(question: &str) -> Option<i64> {
        question
            .split_whitespace()
            .find_map(|token| token.parse::<i64>().ok())
    }
}

impl AnswerService for DemoQa {
    fn ask(&self, question: &str) -> Result<Answer, QaError> {
        let host_id = Self::host_id_of(question)
            .ok_or_else(|| QaError::Service(format!("no host id in question: {}", question)))?;

        // deterministic canned answer derived from the id
        let total = 1 + (host_id % 40);
        let active_pct = 40 + (host_id % 60);
        let text = format!(
            "The host has {} listings and {}% are active",
            total, active_pct
        );

        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.push(HostAnswer {
                host_id,
                answer_text: text.clone(),
            });
        }
        Ok(Answer::Text(text))
    }

    fn train(&self, _item: TrainingItem) -> Result<(), QaError> {
        Ok(())
    }
}
