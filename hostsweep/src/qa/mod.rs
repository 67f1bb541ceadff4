// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Natural-language answering service boundary
//!
//! The answer engine itself is an external collaborator; this module owns
//! the typed boundary to it: the question template the pipeline asks per
//! host, the tagged answer variants it returns, and table registration
//! (training) driven from live schema metadata.

pub mod answer;
pub mod service;
pub mod trainer;

pub use answer::{Answer, HostAnswer};
pub use service::{AnswerService, QaError, TrainingItem};
pub use trainer::{QaTrainer, TrainerError};

/// The per-host question the pipeline asks the answering service
pub fn listing_question(host_id: i64) -> String {
    format!(
        "How many listings does the host {} have, and what % is active?",
        host_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_question_embeds_host() {
        let q = listing_question(217570714);
        assert!(q.contains("217570714"));
        assert!(q.contains("% is active"));
    }
}
