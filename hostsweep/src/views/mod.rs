// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Warehouse view bootstrap
//!
//! Creates and verifies the rollup views the answering service queries.
//! Unlike the sweep pipeline, `create_all_views` is deliberately
//! best-effort: views are independent of each other, so one failing view
//! does not stop the rest; the report says how many made it. The pipeline's
//! fail-fast policy does not apply here and the two are never mixed.

use std::sync::Arc;
use thiserror::Error;

use crate::exec::{ExecutionError, QueryExecutor};
use crate::session::SessionSlot;

/// View bootstrap errors
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("view statement failed: {0}")]
    Execution(#[from] ExecutionError),
}

/// Registered view definitions: (view name, CREATE statement)
pub const VIEW_QUERIES: &[(&str, &str)] = &[(
    "crm_growth_eng.listing__dim_active_curr__v",
    "CREATE OR REPLACE VIEW crm_growth_eng.listing__dim_active_curr__v AS \
     SELECT \
       id_host, \
       COUNT(*) AS total_listings, \
       SUM(CASE WHEN dim_is_active = 1 THEN 1 ELSE 0 END) AS active_listings, \
       SUM(CASE WHEN dim_is_active = 0 THEN 1 ELSE 0 END) AS inactive_listings, \
       ROUND(100.0 * SUM(CASE WHEN dim_is_active = 1 THEN 1 ELSE 0 END) / COUNT(*), 2) AS active_listing_percentage, \
       ROUND(100.0 * SUM(CASE WHEN dim_is_active = 0 THEN 1 ELSE 0 END) / COUNT(*), 2) AS inactive_listing_percentage \
     FROM homes.listing__dim_active \
     WHERE CAST(ds AS DATE) = date_add('day', -2, current_date) \
     GROUP BY id_host",
)];

/// Outcome of a best-effort bootstrap run
#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    pub attempted: usize,
    pub created: usize,
}

impl BootstrapReport {
    pub fn is_complete(&self) -> bool {
        self.created == self.attempted
    }
}

/// Creates and verifies the registered warehouse views
pub struct ViewInitializer {
    executor: Arc<QueryExecutor>,
}

impl ViewInitializer {
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Names of all registered views
    pub fn available_views() -> Vec<&'static str> {
        VIEW_QUERIES.iter().map(|(name, _)| *name).collect()
    }

    /// Create one registered view, then verify it returns data.
    ///
    /// # Returns
    /// * `Ok(true)` - created and the verification query returned rows
    /// * `Ok(false)` - created but the verification query came back empty
    /// * `Err(e)` - the view is unknown or a statement failed
    pub fn create_view(&self, slot: &mut SessionSlot, name: &str) -> Result<bool, ViewError> {
        let (_, sql) = VIEW_QUERIES
            .iter()
            .find(|(view, _)| *view == name)
            .ok_or_else(|| ViewError::UnknownView(name.to_string()))?;

        self.executor.execute(slot, sql)?;

        let verification = self
            .executor
            .execute(slot, &format!("SELECT * FROM {name} LIMIT 1"))?;
        match verification {
            Some(result) if !result.is_empty() => {
                log::info!("View '{}' verification successful - contains data", name);
                Ok(true)
            }
            _ => {
                log::warn!("View '{}' verification failed - no data returned", name);
                Ok(false)
            }
        }
    }

    /// Create every registered view, continuing past individual failures.
    pub fn create_all_views(&self, slot: &mut SessionSlot) -> BootstrapReport {
        let mut report = BootstrapReport::default();
        for (name, _) in VIEW_QUERIES {
            report.attempted += 1;
            match self.create_view(slot, name) {
                Ok(true) => report.created += 1,
                Ok(false) => {}
                Err(e) => {
                    log::error!("Failed to create view '{}': {}", name, e);
                }
            }
        }

        if report.is_complete() {
            log::info!("All {} views created and verified", report.attempted);
        } else {
            log::warn!(
                "Only {}/{} views created successfully",
                report.created,
                report.attempted
            );
        }
        report
    }
}
