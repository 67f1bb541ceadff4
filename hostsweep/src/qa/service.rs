// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Answering service trait

use thiserror::Error;

use crate::qa::answer::Answer;

/// Answering service errors
#[derive(Error, Debug)]
pub enum QaError {
    #[error("answer service failure: {0}")]
    Service(String),

    #[error("answer service rejected training item: {0}")]
    Training(String),
}

/// One unit of training material for the answering service
#[derive(Debug, Clone)]
pub enum TrainingItem {
    /// A table DDL statement teaching the service the schema
    Ddl(String),
    /// A curated question with its reference SQL
    QuestionSql { question: String, sql: String },
}

/// The external natural-language answering service.
///
/// One shared instance serves all workers concurrently; implementations must
/// be safe to call from multiple threads. Failures propagate to the calling
/// task, there is no retry contract at this boundary.
pub trait AnswerService: Send + Sync {
    /// Ask a natural-language question
    fn ask(&self, question: &str) -> Result<Answer, QaError>;

    /// Feed the service one piece of training material
    fn train(&self, item: TrainingItem) -> Result<(), QaError>;
}
