// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
/// Runtime environment for connection-provider selection
///
/// Determines which credential strategy the process uses when establishing
/// engine sessions. Chosen once at startup when the [`ConnectionContext`] is
/// built; nothing downstream branches on it again.
///
/// # Environments
///
/// - **Interactive**: a developer is driving the process; sessions present
///   delegated per-user credentials.
///
/// - **Service**: the process runs as a deployed service; sessions present a
///   mesh-issued service-to-service identity against the production gateway.
///
/// [`ConnectionContext`]: crate::context::ConnectionContext
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Default)]
pub enum RuntimeEnv {
    /// Developer-driven run with delegated user credentials
    Interactive,

    /// Deployed run with service-to-service identity (default)
    #[default]
    Service,
}

impl RuntimeEnv {
    /// Returns true if this is an interactive run
    pub fn is_interactive(&self) -> bool {
        matches!(self, RuntimeEnv::Interactive)
    }

    /// Returns true if this is a deployed service run
    pub fn is_service(&self) -> bool {
        matches!(self, RuntimeEnv::Service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_env() {
        assert_eq!(RuntimeEnv::default(), RuntimeEnv::Service);
    }

    #[test]
    fn test_is_interactive() {
        assert!(RuntimeEnv::Interactive.is_interactive());
        assert!(!RuntimeEnv::Service.is_interactive());
    }

    #[test]
    fn test_is_service() {
        assert!(RuntimeEnv::Service.is_service());
        assert!(!RuntimeEnv::Interactive.is_service());
    }
}
