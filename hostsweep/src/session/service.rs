// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection provider for service environments (production/staging)

use std::sync::Arc;

use crate::engine::{ConnectOptions, EngineConnection, EngineError, QueryEngine};
use crate::session::provider::ConnectionProvider;

/// Establishes connections with a mesh-issued service-to-service identity
pub struct ServiceProvider {
    engine: Arc<dyn QueryEngine>,
    options: ConnectOptions,
}

impl ServiceProvider {
    pub fn new(engine: Arc<dyn QueryEngine>, options: ConnectOptions) -> Self {
        Self { engine, options }
    }
}

impl ConnectionProvider for ServiceProvider {
    fn create_connection(&self) -> Result<Box<dyn EngineConnection>, EngineError> {
        log::info!(
            "Using service-to-service identity for {} client at {}:{}",
            self.engine.name(),
            self.options.host,
            self.options.port
        );
        self.engine.connect(&self.options).map_err(|e| {
            log::error!("Failed to create service connection: {}", e);
            e
        })
    }

    fn describe(&self) -> &str {
        "service-to-service identity"
    }
}
