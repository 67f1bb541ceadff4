// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Table registration for the answering service
//!
//! Before the service can answer listing questions it needs to know the
//! shape of the tables it may query. Registration derives a `CREATE TABLE`
//! DDL from live column metadata (through the schema cache) and pairs it
//! with curated question/SQL examples for the tables the sweep relies on.

use std::sync::Arc;
use thiserror::Error;

use crate::catalog::{CatalogError, SchemaCache};
use crate::exec::QueryExecutor;
use crate::qa::service::{AnswerService, QaError, TrainingItem};
use crate::session::SessionSlot;

/// Trainer errors
#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("training error: {0}")]
    Qa(#[from] QaError),
}

/// Curated question/SQL examples per known table
fn curated_examples(table: &str) -> &'static [(&'static str, &'static str)] {
    match table {
        "itx.dim_salesforce_account_update" => &[
            (
                "how many active listings does the host 217570714 have as of 2025-07-01?",
                "SELECT m_active_listings FROM itx.dim_salesforce_account_update \
                 WHERE host_id_external = 217570714 AND ds = '2025-07-01'",
            ),
            (
                "how many listings does the host 217570714 have?",
                "SELECT m_active_listings + m_deactive_listings AS total_listings \
                 FROM itx.dim_salesforce_account_update \
                 WHERE host_id_external = 217570714 AND ds = '2025-07-01'",
            ),
        ],
        "host_quality.listing__dim_quality_scores_v3" => &[
            (
                "how many Prime listings does host 217570714 have?",
                "SELECT COUNT(*) AS prime_listing_count \
                 FROM host_quality.listing__dim_quality_scores_v3 \
                 WHERE id_host = 217570714 AND quality_score > 1.94 \
                 AND ds = '2025-07-01' AND version = 'QS_GF.2.1'",
            ),
            (
                "What is the average listing quality does the host 217570714 have?",
                "SELECT AVG(quality_score) AS average_quality \
                 FROM host_quality.listing__dim_quality_scores_v3 \
                 WHERE id_host = 217570714 AND ds = '2025-07-01' AND version = 'QS_GF.2.1'",
            ),
            (
                "what is the quality trend since 2025-06-01 of host 217570714?",
                "SELECT AVG(quality_score) AS average_quality, \
                 MIN(quality_score) AS min_quality, \
                 MAX(quality_score) AS max_quality, \
                 STDDEV(quality_score) AS stddev_quality \
                 FROM host_quality.listing__dim_quality_scores_v3 \
                 WHERE id_host = 217570714 AND ds > '2025-06-01' AND version = 'QS_GF.2.1'",
            ),
        ],
        "host_growth.listing__fct_deactivation_types_and_reasons" => &[
            (
                "what are the deactivation type and reason of host 123456789 since 2025-07-01?",
                "SELECT dim_type, dim_reason \
                 FROM host_growth.listing__fct_deactivation_types_and_reasons \
                 WHERE id_host = 123456789 AND ds >= '2025-07-01'",
            ),
            (
                "what are the top deactivation types since 2025-01-01 for all hosts?",
                "SELECT dim_type, COUNT(*) \
                 FROM host_growth.listing__fct_deactivation_types_and_reasons \
                 WHERE ds > '2025-01-01' GROUP BY dim_type ORDER BY COUNT(*) DESC",
            ),
            (
                "which host deactivated the most listings since 2025-07-01?",
                "SELECT id_host, COUNT(*) AS deactivation_count \
                 FROM host_growth.listing__fct_deactivation_types_and_reasons \
                 WHERE ds > '2025-07-01' GROUP BY id_host ORDER BY COUNT(*) DESC",
            ),
        ],
        _ => &[],
    }
}

/// Registers warehouse tables with the answering service
pub struct QaTrainer {
    executor: Arc<QueryExecutor>,
    cache: Arc<SchemaCache>,
}

impl QaTrainer {
    pub fn new(executor: Arc<QueryExecutor>, cache: Arc<SchemaCache>) -> Self {
        Self { executor, cache }
    }

    /// Register one table: teach the service its DDL, then its curated
    /// examples (if any).
    pub fn register_table(
        &self,
        slot: &mut SessionSlot,
        qa: &dyn AnswerService,
        table: &str,
    ) -> Result<(), TrainerError> {
        let ddl = self.table_ddl(slot, table)?;
        qa.train(TrainingItem::Ddl(ddl))?;

        let examples = curated_examples(table);
        for (question, sql) in examples {
            qa.train(TrainingItem::QuestionSql {
                question: (*question).to_string(),
                sql: (*sql).to_string(),
            })?;
        }

        log::info!(
            "Registered table {} with {} curated examples",
            table,
            examples.len()
        );
        Ok(())
    }

    /// Derive a `CREATE TABLE` DDL from live column metadata
    fn table_ddl(&self, slot: &mut SessionSlot, table: &str) -> Result<String, TrainerError> {
        let schema = self.cache.get_or_describe(&self.executor, slot, table)?;
        let columns: Vec<String> = schema
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.data_type))
            .collect();
        Ok(format!("CREATE TABLE {} ({})", table, columns.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ConnectOptions, MemoryEngine, QueryEngine, ScalarValue};
    use crate::qa::answer::Answer;
    use crate::session::{PoolConfig, ServiceProvider, SessionPool};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingQa {
        trained: Mutex<Vec<TrainingItem>>,
    }

    impl AnswerService for RecordingQa {
        fn ask(&self, _question: &str) -> Result<Answer, QaError> {
            Ok(Answer::Text("unused".to_string()))
        }

        fn train(&self, item: TrainingItem) -> Result<(), QaError> {
            self.trained.lock().push(item);
            Ok(())
        }
    }

    #[test]
    fn test_register_table_trains_ddl_and_examples() {
        let engine = MemoryEngine::new();
        engine.create_table(
            "itx.dim_salesforce_account_update",
            &[
                ("host_id_external", "bigint"),
                ("m_active_listings", "bigint"),
                ("m_deactive_listings", "bigint"),
                ("ds", "varchar"),
            ],
            vec![vec![
                ScalarValue::Bigint(1),
                ScalarValue::Bigint(2),
                ScalarValue::Bigint(3),
                ScalarValue::Varchar("2026-08-04".to_string()),
            ]],
        );
        let provider = Arc::new(ServiceProvider::new(
            Arc::new(engine) as Arc<dyn QueryEngine>,
            ConnectOptions::service(),
        ));
        let executor = Arc::new(QueryExecutor::new(Arc::new(SessionPool::new(
            provider,
            PoolConfig::default(),
        ))));
        let trainer = QaTrainer::new(executor, Arc::new(SchemaCache::new()));
        let qa = RecordingQa::default();
        let mut slot = SessionSlot::driver();

        trainer
            .register_table(&mut slot, &qa, "itx.dim_salesforce_account_update")
            .unwrap();

        let trained = qa.trained.lock();
        assert_eq!(trained.len(), 3); // 1 DDL + 2 examples
        match &trained[0] {
            TrainingItem::Ddl(ddl) => {
                assert!(ddl.starts_with("CREATE TABLE itx.dim_salesforce_account_update ("));
                assert!(ddl.contains("host_id_external bigint"));
            }
            other => panic!("expected DDL first, got {:?}", other),
        }
        assert!(matches!(&trained[1], TrainingItem::QuestionSql { .. }));
    }
}
