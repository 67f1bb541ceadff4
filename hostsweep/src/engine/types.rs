// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine value and connection-option types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default warehouse gateway host for service deployments
pub const DEFAULT_GATEWAY_HOST: &str = "presto-gateway-production.presto-gateway-production";
/// Default warehouse gateway port
pub const DEFAULT_GATEWAY_PORT: u16 = 6375;
/// Default catalog
pub const DEFAULT_CATALOG: &str = "silver";
/// Default connection timeout in seconds
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 300;

/// A single column value returned by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Null,
    Bigint(i64),
    Double(f64),
    Boolean(bool),
    Varchar(String),
}

impl ScalarValue {
    /// Interpret the value as an `i64` where the engine may have returned
    /// either an integer or its textual form.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Bigint(v) => Some(*v),
            ScalarValue::Varchar(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "NULL"),
            ScalarValue::Bigint(v) => write!(f, "{}", v),
            ScalarValue::Double(v) => write!(f, "{}", v),
            ScalarValue::Boolean(v) => write!(f, "{}", v),
            ScalarValue::Varchar(s) => write!(f, "{}", s),
        }
    }
}

/// How a connection authenticates against the engine gateway.
///
/// Credential issuance itself is external; the mode only selects which
/// issued identity a connection presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialMode {
    /// Delegated per-user credentials from the developer environment
    Interactive,
    /// Mesh-issued service-to-service identity
    ServiceMesh,
}

impl fmt::Display for CredentialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialMode::Interactive => write!(f, "interactive"),
            CredentialMode::ServiceMesh => write!(f, "service-mesh"),
        }
    }
}

/// Connection parameters handed to [`QueryEngine::connect`]
///
/// [`QueryEngine::connect`]: crate::engine::QueryEngine::connect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub catalog: String,
    pub connection_timeout: Duration,
    pub credentials: CredentialMode,
}

impl ConnectOptions {
    /// Options for an interactive developer session
    pub fn interactive() -> Self {
        Self {
            credentials: CredentialMode::Interactive,
            ..Self::service()
        }
    }

    /// Options for a service deployment behind the production gateway
    pub fn service() -> Self {
        Self {
            host: DEFAULT_GATEWAY_HOST.to_string(),
            port: DEFAULT_GATEWAY_PORT,
            catalog: DEFAULT_CATALOG.to_string(),
            connection_timeout: Duration::from_secs(DEFAULT_CONNECTION_TIMEOUT_SECS),
            credentials: CredentialMode::ServiceMesh,
        }
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}
