// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Process-wide connection context
//!
//! Constructed once at startup and passed by reference to every consumer.
//! The environment decides the credential strategy exactly once, here; the
//! pool, executor and schema cache are then shared handles with no hidden
//! global state behind them.

use std::sync::Arc;

use crate::catalog::SchemaCache;
use crate::engine::{ConnectOptions, QueryEngine};
use crate::exec::QueryExecutor;
use crate::pipeline::{HostPipeline, PipelineConfig};
use crate::qa::{AnswerService, QaTrainer};
use crate::scan::ScanSpec;
use crate::session::{
    ConnectionProvider, InteractiveProvider, PoolConfig, RuntimeEnv, ServiceProvider, SessionPool,
};
use crate::views::ViewInitializer;

/// Explicit bundle of everything that talks to the engine
pub struct ConnectionContext {
    provider: Arc<dyn ConnectionProvider>,
    pool: Arc<SessionPool>,
    executor: Arc<QueryExecutor>,
    schema_cache: Arc<SchemaCache>,
}

impl ConnectionContext {
    /// Context with default pool configuration
    pub fn new(env: RuntimeEnv, engine: Arc<dyn QueryEngine>) -> Self {
        Self::with_pool_config(env, engine, PoolConfig::default())
    }

    /// Context with explicit pool configuration.
    ///
    /// This is the single startup-time branch on the environment; nothing
    /// downstream selects a credential strategy again.
    pub fn with_pool_config(
        env: RuntimeEnv,
        engine: Arc<dyn QueryEngine>,
        pool_config: PoolConfig,
    ) -> Self {
        log::info!("Initializing connection context for {:?} environment", env);

        let provider: Arc<dyn ConnectionProvider> = match env {
            RuntimeEnv::Interactive => Arc::new(InteractiveProvider::new(
                engine,
                ConnectOptions::interactive()
                    .with_connection_timeout(pool_config.connection_timeout),
            )),
            RuntimeEnv::Service => Arc::new(ServiceProvider::new(
                engine,
                ConnectOptions::service()
                    .with_connection_timeout(pool_config.connection_timeout),
            )),
        };

        let pool = Arc::new(SessionPool::new(Arc::clone(&provider), pool_config));
        let executor = Arc::new(QueryExecutor::new(Arc::clone(&pool)));

        Self {
            provider,
            pool,
            executor,
            schema_cache: Arc::new(SchemaCache::new()),
        }
    }

    pub fn provider(&self) -> &Arc<dyn ConnectionProvider> {
        &self.provider
    }

    pub fn pool(&self) -> &Arc<SessionPool> {
        &self.pool
    }

    pub fn executor(&self) -> &Arc<QueryExecutor> {
        &self.executor
    }

    pub fn schema_cache(&self) -> &Arc<SchemaCache> {
        &self.schema_cache
    }

    /// Sweep pipeline over this context's executor
    pub fn pipeline(
        &self,
        qa: Arc<dyn AnswerService>,
        scan: ScanSpec,
        config: PipelineConfig,
    ) -> HostPipeline {
        HostPipeline::new(Arc::clone(&self.executor), qa)
            .with_scan(scan)
            .with_config(config)
    }

    /// View bootstrap over this context's executor
    pub fn view_initializer(&self) -> ViewInitializer {
        ViewInitializer::new(Arc::clone(&self.executor))
    }

    /// Table registration over this context's executor and schema cache
    pub fn qa_trainer(&self) -> QaTrainer {
        QaTrainer::new(Arc::clone(&self.executor), Arc::clone(&self.schema_cache))
    }
}
