// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session pool with age, reuse and liveness retirement
//!
//! The pool is policy plus factory; the sessions themselves live in
//! per-worker [`SessionSlot`]s. `acquire` validates the cached session in a
//! fixed order - age, then reuse count, then a liveness probe - and
//! transparently replaces it when any check fails. Callers never observe
//! retirement, only a successful (possibly slower) acquisition.
//!
//! A session that fails during *actual* use cannot be trusted for reuse;
//! the executor reports that through [`SessionPool::invalidate`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::engine::{EngineConnection, EngineCursor, EngineError};
use crate::session::models::{Session, SessionSlot, WorkerId};
use crate::session::provider::ConnectionProvider;

/// The no-op statement used to test whether a cached session is still live
pub const LIVENESS_PROBE: &str = "SELECT 1";

/// Default maximum session age in seconds
pub const DEFAULT_MAX_AGE_SECS: u64 = 600;
/// Default maximum acquisitions per session
pub const DEFAULT_MAX_REUSE: u32 = 10;

/// Session pool errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to establish engine session: {0}")]
    Connect(#[from] EngineError),
}

/// Pool configuration
///
/// `max_age` and `max_reuse` bound the blast radius of a slowly-degrading
/// remote session without paying connection setup on every call.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_age: Duration,
    pub max_reuse: u32,
    pub connection_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(DEFAULT_MAX_AGE_SECS),
            max_reuse: DEFAULT_MAX_REUSE,
            connection_timeout: Duration::from_secs(
                crate::engine::types::DEFAULT_CONNECTION_TIMEOUT_SECS,
            ),
        }
    }
}

/// Time source for age-based retirement, injectable for tests
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source used outside of tests
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manages creation, reuse and retirement of engine sessions
pub struct SessionPool {
    provider: Arc<dyn ConnectionProvider>,
    config: PoolConfig,
    clock: Arc<dyn Clock>,
}

impl SessionPool {
    pub fn new(provider: Arc<dyn ConnectionProvider>, config: PoolConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Pool with an injected time source
    pub fn with_clock(
        provider: Arc<dyn ConnectionProvider>,
        config: PoolConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Acquire a usable session for the slot's owner.
    ///
    /// On the first call for a slot this creates a session; on later calls
    /// the cached session is validated (age, reuse, liveness, in that order)
    /// and transparently replaced if any check fails. Creation failure
    /// propagates; the pool does not retry internally.
    pub fn acquire<'a>(&self, slot: &'a mut SessionSlot) -> Result<&'a mut Session, SessionError> {
        let validated = match slot.cached.take() {
            Some(session) => self.revalidate(session),
            None => None,
        };

        let mut session = match validated {
            Some(session) => session,
            None => self.create(slot.owner().clone())?,
        };
        session.use_count += 1;

        Ok(slot.cached.insert(session))
    }

    /// Discard the slot's session after a failure during actual use.
    ///
    /// A session that failed mid-query cannot be trusted for reuse; the next
    /// `acquire` on the slot will create a replacement.
    pub fn invalidate(&self, slot: &mut SessionSlot) {
        if let Some(mut session) = slot.cached.take() {
            log::warn!(
                "Discarding session {} for {} after use failure",
                session.session_id,
                session.owner
            );
            session.conn.close();
        }
    }

    fn create(&self, owner: WorkerId) -> Result<Session, SessionError> {
        let conn = self.provider.create_connection()?;
        let session = Session::new(conn, owner, self.clock.now());
        log::debug!(
            "Created session {} for {} ({})",
            session.session_id,
            session.owner,
            self.provider.describe()
        );
        Ok(session)
    }

    /// Returns the session if still trustworthy, `None` after retiring it
    fn revalidate(&self, mut session: Session) -> Option<Session> {
        let age = self.clock.now().saturating_duration_since(session.created_at);
        if age > self.config.max_age {
            self.retire(session, "max age exceeded");
            return None;
        }

        if session.use_count >= self.config.max_reuse {
            self.retire(session, "max reuse exceeded");
            return None;
        }

        if let Err(e) = probe(&mut session) {
            log::debug!("Liveness probe failed for session {}: {}", session.session_id, e);
            self.retire(session, "liveness probe failed");
            return None;
        }

        Some(session)
    }

    fn retire(&self, mut session: Session, reason: &str) {
        log::info!(
            "Retiring session {} for {} after {} uses: {}",
            session.session_id,
            session.owner,
            session.use_count,
            reason
        );
        session.conn.close();
    }
}

fn probe(session: &mut Session) -> Result<(), EngineError> {
    let mut cursor = session.conn.open_cursor()?;
    let result = cursor.execute(LIVENESS_PROBE);
    cursor.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ConnectOptions, MemoryEngine, QueryEngine};
    use crate::session::service::ServiceProvider;
    use parking_lot::Mutex;

    /// Advanceable time source for retirement tests
    struct ManualClock {
        base: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            *self.offset.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + *self.offset.lock()
        }
    }

    fn pool_over(engine: &MemoryEngine, config: PoolConfig, clock: Arc<dyn Clock>) -> SessionPool {
        let provider = Arc::new(ServiceProvider::new(
            Arc::new(engine.clone()) as Arc<dyn QueryEngine>,
            ConnectOptions::service(),
        ));
        SessionPool::with_clock(provider, config, clock)
    }

    #[test]
    fn test_first_acquire_creates_session() {
        let engine = MemoryEngine::new();
        let pool = pool_over(&engine, PoolConfig::default(), Arc::new(SystemClock));
        let mut slot = SessionSlot::driver();

        let session = pool.acquire(&mut slot).unwrap();
        assert_eq!(session.use_count, 1);
        assert_eq!(engine.connections_created(), 1);
    }

    #[test]
    fn test_reuse_within_limits_keeps_session() {
        let engine = MemoryEngine::new();
        let pool = pool_over(&engine, PoolConfig::default(), Arc::new(SystemClock));
        let mut slot = SessionSlot::driver();

        let first_id = pool.acquire(&mut slot).unwrap().session_id;
        let second = pool.acquire(&mut slot).unwrap();
        assert_eq!(second.session_id, first_id);
        assert_eq!(second.use_count, 2);
        assert_eq!(engine.connections_created(), 1);
    }

    #[test]
    fn test_reuse_retirement_on_eleventh_acquire() {
        let engine = MemoryEngine::new();
        let pool = pool_over(&engine, PoolConfig::default(), Arc::new(SystemClock));
        let mut slot = SessionSlot::driver();

        let first_id = pool.acquire(&mut slot).unwrap().session_id;
        for _ in 0..9 {
            assert_eq!(pool.acquire(&mut slot).unwrap().session_id, first_id);
        }
        assert_eq!(engine.connections_created(), 1);

        // 11th acquisition: use_count has reached max_reuse, replacement is
        // transparent and the call still succeeds
        let replacement = pool.acquire(&mut slot).unwrap();
        assert_ne!(replacement.session_id, first_id);
        assert_eq!(replacement.use_count, 1);
        assert_eq!(engine.connections_created(), 2);
    }

    #[test]
    fn test_age_retirement() {
        let engine = MemoryEngine::new();
        let clock = Arc::new(ManualClock::new());
        let pool = pool_over(&engine, PoolConfig::default(), clock.clone());
        let mut slot = SessionSlot::driver();

        let first_id = pool.acquire(&mut slot).unwrap().session_id;
        clock.advance(Duration::from_secs(DEFAULT_MAX_AGE_SECS + 1));

        let replacement = pool.acquire(&mut slot).unwrap();
        assert_ne!(replacement.session_id, first_id);
        assert_eq!(engine.connections_created(), 2);
    }

    #[test]
    fn test_liveness_retirement() {
        let engine = MemoryEngine::new();
        let pool = pool_over(&engine, PoolConfig::default(), Arc::new(SystemClock));
        let mut slot = SessionSlot::driver();

        let first_id = pool.acquire(&mut slot).unwrap().session_id;
        engine.invalidate_connections();

        let replacement = pool.acquire(&mut slot).unwrap();
        assert_ne!(replacement.session_id, first_id);
        assert_eq!(engine.connections_created(), 2);
    }

    #[test]
    fn test_create_failure_propagates() {
        let engine = MemoryEngine::new();
        let pool = pool_over(&engine, PoolConfig::default(), Arc::new(SystemClock));
        let mut slot = SessionSlot::driver();

        engine.fail_next_connects(1);
        assert!(matches!(
            pool.acquire(&mut slot),
            Err(SessionError::Connect(_))
        ));
        assert!(!slot.is_populated());

        // not retried internally, but the next acquire recovers
        assert!(pool.acquire(&mut slot).is_ok());
    }

    #[test]
    fn test_invalidate_clears_slot() {
        let engine = MemoryEngine::new();
        let pool = pool_over(&engine, PoolConfig::default(), Arc::new(SystemClock));
        let mut slot = SessionSlot::driver();

        pool.acquire(&mut slot).unwrap();
        assert!(slot.is_populated());

        pool.invalidate(&mut slot);
        assert!(!slot.is_populated());

        let replacement = pool.acquire(&mut slot).unwrap();
        assert_eq!(replacement.use_count, 1);
        assert_eq!(engine.connections_created(), 2);
    }
}
