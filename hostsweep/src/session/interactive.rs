// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection provider for interactive environments (development/local)

use std::sync::Arc;

use crate::engine::{ConnectOptions, EngineConnection, EngineError, QueryEngine};
use crate::session::provider::ConnectionProvider;

/// Establishes connections with delegated per-user credentials
pub struct InteractiveProvider {
    engine: Arc<dyn QueryEngine>,
    options: ConnectOptions,
}

impl InteractiveProvider {
    pub fn new(engine: Arc<dyn QueryEngine>, options: ConnectOptions) -> Self {
        Self { engine, options }
    }
}

impl ConnectionProvider for InteractiveProvider {
    fn create_connection(&self) -> Result<Box<dyn EngineConnection>, EngineError> {
        log::info!(
            "Using interactive credentials for {} client",
            self.engine.name()
        );
        self.engine.connect(&self.options).map_err(|e| {
            log::error!("Failed to create interactive connection: {}", e);
            e
        })
    }

    fn describe(&self) -> &str {
        "interactive credentials"
    }
}
