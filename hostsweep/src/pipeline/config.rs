// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Pipeline tunables

use serde::{Deserialize, Serialize};

/// Default keys per page
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Default worker count
pub const DEFAULT_CONCURRENCY: usize = 4;
/// Default cap on total keys swept
pub const DEFAULT_MAX_COUNT: usize = 100;

/// Pipeline configuration
///
/// `max_count = None` sweeps the whole key space. A `concurrency` of zero is
/// coerced to 1 at the setter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    page_size: usize,
    max_count: Option<usize>,
    concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_count: Some(DEFAULT_MAX_COUNT),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_count(mut self, max_count: Option<usize>) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}
