// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection provider abstraction
//!
//! A provider knows how to establish one engine connection with the right
//! credentials for the environment the process runs in. The pool calls it
//! whenever a slot needs a fresh session; it holds no connection state of
//! its own.

use crate::engine::{EngineConnection, EngineError};

/// Abstract connection provider interface
///
/// Two implementations exist:
/// - `InteractiveProvider`: delegated per-user credentials
/// - `ServiceProvider`: mesh-issued service-to-service identity
pub trait ConnectionProvider: Send + Sync {
    /// Establish a new engine connection.
    ///
    /// # Returns
    /// * `Ok(connection)` - a fresh, exclusively-owned connection
    /// * `Err(e)` - the transient connection fault, not retried here
    fn create_connection(&self) -> Result<Box<dyn EngineConnection>, EngineError>;

    /// Short description of the credential strategy, for logs
    fn describe(&self) -> &str;
}
